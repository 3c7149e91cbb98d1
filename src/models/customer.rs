use serde::{Deserialize, Deserializer, Serialize};

/// A customer record as exchanged with the customer service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned id, absent until the first round-trip supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub firstname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lastname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    /// Lifecycle flag, the service treats a missing value as active
    #[serde(default = "default_active")]
    pub active: bool,
    /// Marketing-subscription flag
    #[serde(default)]
    pub promo: bool,
}

/// Request body for create and update: every field except `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPayload {
    pub username: String,
    pub password: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub address: String,
    pub active: bool,
    pub promo: bool,
}

/// Failure body returned by the service on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET /healthcheck`
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
}

fn default_active() -> bool {
    true
}

// The service serializes unset optional columns (address, phone) as null
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Customer {
    pub fn payload(&self) -> CustomerPayload {
        CustomerPayload::from(self)
    }
}

impl From<&Customer> for CustomerPayload {
    fn from(customer: &Customer) -> Self {
        Self {
            username: customer.username.clone(),
            password: customer.password.clone(),
            email: customer.email.clone(),
            firstname: customer.firstname.clone(),
            lastname: customer.lastname.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            active: customer.active,
            promo: customer.promo,
        }
    }
}
