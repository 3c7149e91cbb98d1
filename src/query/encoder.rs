use crate::form::binder::{CustomerForm, FormField};
use serde::Serialize;

/// Three-state selector for the boolean search filters.
///
/// `Unset` is distinct from an explicit `False`: only explicit values are
/// sent to the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoolFilter {
    #[default]
    Unset,
    True,
    False,
}

impl BoolFilter {
    /// Interpret the UI selector text: `"true"`/`"false"` (any case) are
    /// explicit, anything else leaves the filter unset.
    pub fn from_ui(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" => BoolFilter::True,
            "false" => BoolFilter::False,
            _ => BoolFilter::Unset,
        }
    }

    pub fn as_option(self) -> Option<bool> {
        match self {
            BoolFilter::Unset => None,
            BoolFilter::True => Some(true),
            BoolFilter::False => Some(false),
        }
    }
}

impl From<bool> for BoolFilter {
    fn from(value: bool) -> Self {
        if value { BoolFilter::True } else { BoolFilter::False }
    }
}

/// Sparse search criteria for `GET /customers`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub username: Option<String>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: BoolFilter,
    pub promo: BoolFilter,
}

// Field declaration order is the emission order
#[derive(Serialize)]
struct QueryPairs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    firstname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lastname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    promo: Option<bool>,
}

fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl SearchFilter {
    /// Collect the search criteria currently entered in the form.
    ///
    /// `active`/`promo` count only when the operator set them; values the
    /// form picked up from a response leave the filter unset.
    pub fn from_form(form: &CustomerForm) -> Self {
        let text = |field: FormField| {
            let value = form.get(field);
            (!value.is_empty()).then(|| value.to_string())
        };
        // Boolean text written back from a response is not a filter choice
        let flag = |field: FormField| {
            if form.is_operator_set(field) {
                BoolFilter::from_ui(form.get(field))
            } else {
                BoolFilter::Unset
            }
        };

        Self {
            username: text(FormField::Username),
            email: text(FormField::Email),
            firstname: text(FormField::Firstname),
            lastname: text(FormField::Lastname),
            phone: text(FormField::Phone),
            address: text(FormField::Address),
            active: flag(FormField::Active),
            promo: flag(FormField::Promo),
        }
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.username,
            &self.email,
            &self.firstname,
            &self.lastname,
            &self.phone,
            &self.address,
        ]
        .into_iter()
        .all(|value| provided(value).is_none())
            && self.active == BoolFilter::Unset
            && self.promo == BoolFilter::Unset
    }

    /// Build the URL query string, without the leading `?`.
    ///
    /// Empty strings and unset booleans are omitted, values are
    /// percent-encoded, and pairs always come out in the order
    /// username, email, firstname, lastname, phone, address, active, promo.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(QueryPairs {
            username: provided(&self.username),
            email: provided(&self.email),
            firstname: provided(&self.firstname),
            lastname: provided(&self.lastname),
            phone: provided(&self.phone),
            address: provided(&self.address),
            active: self.active.as_option(),
            promo: self.promo.as_option(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::Customer;

    fn full_filter() -> SearchFilter {
        SearchFilter {
            username: Some("alice".to_string()),
            email: Some("a@x.io".to_string()),
            firstname: Some("Alice".to_string()),
            lastname: Some("Liddell".to_string()),
            phone: Some("555".to_string()),
            address: Some("Wonderland".to_string()),
            active: BoolFilter::True,
            promo: BoolFilter::False,
        }
    }

    #[test]
    fn test_empty_filter_encodes_to_nothing() {
        let filter = SearchFilter::default();
        assert_eq!(filter.encode().unwrap(), "");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_full_filter_fixed_order() {
        assert_eq!(
            full_filter().encode().unwrap(),
            "username=alice&email=a%40x.io&firstname=Alice&lastname=Liddell\
             &phone=555&address=Wonderland&active=true&promo=false"
        );
    }

    #[test]
    fn test_single_field_has_no_separator() {
        let filter = SearchFilter {
            lastname: Some("Liddell".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.encode().unwrap(), "lastname=Liddell");
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let filter = SearchFilter {
            username: Some(String::new()),
            phone: Some("555".to_string()),
            promo: BoolFilter::True,
            ..Default::default()
        };
        assert_eq!(filter.encode().unwrap(), "phone=555&promo=true");
    }

    #[test]
    fn test_separators_for_every_subset() {
        let full = full_filter();
        for mask in 0u32..256 {
            let pick = |bit: u32, value: &Option<String>| {
                if mask & (1 << bit) != 0 { value.clone() } else { None }
            };
            let filter = SearchFilter {
                username: pick(0, &full.username),
                email: pick(1, &full.email),
                firstname: pick(2, &full.firstname),
                lastname: pick(3, &full.lastname),
                phone: pick(4, &full.phone),
                address: pick(5, &full.address),
                active: if mask & (1 << 6) != 0 { full.active } else { BoolFilter::Unset },
                promo: if mask & (1 << 7) != 0 { full.promo } else { BoolFilter::Unset },
            };

            let query = filter.encode().unwrap();
            assert!(!query.starts_with('&'), "leading separator in {query}");
            assert!(!query.ends_with('&'), "trailing separator in {query}");
            assert!(!query.contains("&&"), "doubled separator in {query}");
            assert_eq!(query.split('&').filter(|p| !p.is_empty()).count(), mask.count_ones() as usize);

            let keys: Vec<&str> = query
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|pair| pair.split('=').next().unwrap_or(""))
                .collect();
            let order = ["username", "email", "firstname", "lastname", "phone", "address", "active", "promo"];
            let positions: Vec<usize> = keys
                .iter()
                .map(|key| order.iter().position(|o| o == key).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {query}");
        }
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let filter = SearchFilter {
            address: Some("12 Main St & 5th".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.encode().unwrap(), "address=12+Main+St+%26+5th");
    }

    #[test]
    fn test_explicit_false_is_sent_unset_is_not() {
        let explicit = SearchFilter {
            active: BoolFilter::False,
            ..Default::default()
        };
        assert_eq!(explicit.encode().unwrap(), "active=false");

        let unset = SearchFilter::default();
        assert_eq!(unset.encode().unwrap(), "");
    }

    #[test]
    fn test_bool_filter_from_ui() {
        assert_eq!(BoolFilter::from_ui(""), BoolFilter::Unset);
        assert_eq!(BoolFilter::from_ui("True"), BoolFilter::True);
        assert_eq!(BoolFilter::from_ui("false"), BoolFilter::False);
        assert_eq!(BoolFilter::from_ui("maybe"), BoolFilter::Unset);
    }

    #[test]
    fn test_from_form_skips_id_and_password() {
        let mut form = CustomerForm::new();
        form.set(FormField::Id, "9");
        form.set(FormField::Password, "hunter2");
        form.set(FormField::Email, "bob@example.com");
        form.set(FormField::Active, "false");

        let filter = SearchFilter::from_form(&form);
        assert_eq!(filter.encode().unwrap(), "email=bob%40example.com&active=false");
    }

    #[test]
    fn test_booleans_written_from_response_are_not_filters() {
        let mut form = CustomerForm::new();
        form.write(&Customer {
            id: Some(4),
            username: "dora".to_string(),
            active: true,
            promo: false,
            ..Default::default()
        });
        form.set(FormField::Username, "");

        let filter = SearchFilter::from_form(&form);
        assert_eq!(filter.active, BoolFilter::Unset);
        assert_eq!(filter.promo, BoolFilter::Unset);
        assert_eq!(filter.encode().unwrap(), "");

        form.set(FormField::Promo, "false");
        assert_eq!(SearchFilter::from_form(&form).encode().unwrap(), "promo=false");
    }
}
