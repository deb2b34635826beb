//! WHOIS record and error types.

use thiserror::Error;

/// A WHOIS field as registries return it: once, or repeated with several values
/// (historical dates, multiple registrars).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoisValue {
    Single(String),
    Many(Vec<String>),
}

impl WhoisValue {
    /// Builds a value from every occurrence of a field, or `None` if there were none.
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(WhoisValue::Single),
            _ => Some(WhoisValue::Many(values)),
        }
    }

    /// The first value, or `None` when it is blank.
    pub fn first(&self) -> Option<&str> {
        match self {
            WhoisValue::Single(value) => Some(value.as_str()),
            WhoisValue::Many(values) => values.iter().map(String::as_str).next(),
        }
        .map(str::trim)
        .filter(|value| !value.is_empty())
    }
}

/// The registration fields the domain analyzer reports on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisRecord {
    pub registrar: Option<WhoisValue>,
    pub creation_date: Option<WhoisValue>,
    pub expiration_date: Option<WhoisValue>,
    pub country: Option<WhoisValue>,
}

impl WhoisRecord {
    pub fn is_empty(&self) -> bool {
        self.registrar.is_none()
            && self.creation_date.is_none()
            && self.expiration_date.is_none()
            && self.country.is_none()
    }
}

#[derive(Debug, Error)]
pub enum WhoisError {
    #[error("could not start the WHOIS client: {reason}")]
    Client { reason: String },

    #[error("WHOIS lookup for '{domain}' failed: {reason}")]
    Lookup { domain: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_prefers_earliest_value() {
        let many = WhoisValue::Many(vec!["1997-09-15".into(), "2020-01-01".into()]);
        assert_eq!(many.first(), Some("1997-09-15"));
        assert_eq!(WhoisValue::Single("  ".into()).first(), None);
    }

    #[test]
    fn from_values_picks_variant() {
        assert_eq!(WhoisValue::from_values(vec![]), None);
        assert_eq!(
            WhoisValue::from_values(vec!["a".into()]),
            Some(WhoisValue::Single("a".into()))
        );
        assert!(matches!(
            WhoisValue::from_values(vec!["a".into(), "b".into()]),
            Some(WhoisValue::Many(_))
        ));
    }

    #[test]
    fn empty_record_has_no_fields() {
        assert!(WhoisRecord::default().is_empty());
        let record = WhoisRecord {
            country: Some(WhoisValue::Single("US".into())),
            ..Default::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn errors_name_the_domain() {
        let err = WhoisError::Lookup {
            domain: "example.com".into(),
            reason: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "WHOIS lookup for 'example.com' failed: rate limited");
    }
}
