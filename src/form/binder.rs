use crate::core::error::ClientError;
use crate::models::customer::Customer;
use std::fmt;
use std::str::FromStr;

/// The canonical set of bound form fields, one per `Customer` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Username,
    Password,
    Email,
    Firstname,
    Lastname,
    Phone,
    Address,
    Active,
    Promo,
}

impl FormField {
    pub const COUNT: usize = 10;

    pub const ALL: [FormField; FormField::COUNT] = [
        FormField::Id,
        FormField::Username,
        FormField::Password,
        FormField::Email,
        FormField::Firstname,
        FormField::Lastname,
        FormField::Phone,
        FormField::Address,
        FormField::Active,
        FormField::Promo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::Id => "id",
            FormField::Username => "username",
            FormField::Password => "password",
            FormField::Email => "email",
            FormField::Firstname => "firstname",
            FormField::Lastname => "lastname",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::Active => "active",
            FormField::Promo => "promo",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == lowered)
            .ok_or_else(|| format!("Unknown field '{}'", s))
    }
}

/// Text values of the bound form, stored as the UI holds them.
///
/// Writes and clears always replace the whole field set at once. Each field
/// also remembers whether its current value came from the operator or from
/// a server response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    values: [String; FormField::COUNT],
    operator_set: [bool; FormField::COUNT],
}

impl CustomerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    /// Operator edit of a single field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.operator_set[field.index()] = !value.is_empty();
        self.values[field.index()] = value;
    }

    /// True when the operator typed the current value of `field`
    pub fn is_operator_set(&self, field: FormField) -> bool {
        self.operator_set[field.index()]
    }

    /// Extract a `Customer` from the current field values.
    ///
    /// `active`/`promo` are true only for the literal text `"true"`. An id
    /// that does not parse reads as absent; use [`CustomerForm::customer_id`]
    /// when the id is a precondition.
    pub fn read(&self) -> Customer {
        Customer {
            id: self.customer_id().ok(),
            username: self.get(FormField::Username).to_string(),
            password: self.get(FormField::Password).to_string(),
            email: self.get(FormField::Email).to_string(),
            firstname: self.get(FormField::Firstname).to_string(),
            lastname: self.get(FormField::Lastname).to_string(),
            phone: self.get(FormField::Phone).to_string(),
            address: self.get(FormField::Address).to_string(),
            active: self.get(FormField::Active) == "true",
            promo: self.get(FormField::Promo) == "true",
        }
    }

    /// Populate every bound field from `customer`
    pub fn write(&mut self, customer: &Customer) {
        self.values = [
            customer.id.map(|id| id.to_string()).unwrap_or_default(),
            customer.username.clone(),
            customer.password.clone(),
            customer.email.clone(),
            customer.firstname.clone(),
            customer.lastname.clone(),
            customer.phone.clone(),
            customer.address.clone(),
            bool_text(customer.active).to_string(),
            bool_text(customer.promo).to_string(),
        ];
        self.operator_set = [false; FormField::COUNT];
    }

    /// Reset every bound field to the empty string
    pub fn clear(&mut self) {
        self.values = Default::default();
        self.operator_set = [false; FormField::COUNT];
    }

    /// The id an id-addressed operation should target
    pub fn customer_id(&self) -> Result<u64, ClientError> {
        let raw = self.get(FormField::Id).trim();
        if raw.is_empty() {
            return Err(ClientError::MissingId);
        }

        match raw.parse::<u64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(ClientError::InvalidId(raw.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        FormField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
