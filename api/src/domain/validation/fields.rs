//! Accumulator for per-field validation failures

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{DomainError, FieldError, FieldValidationError};

/// Collects field errors so a request reports every problem at once.
///
/// Setting a field twice keeps the later message.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => self.errors.push(FieldError {
                field: field.to_string(),
                message,
            }),
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> FieldValidationError {
        FieldValidationError {
            errors: self.errors,
        }
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Fields(self.into_error()))
        }
    }
}

/// Trimmed value of an optional text field, `None` when missing or blank
pub fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// UUID held by a JSON string; any other value yields `None`
pub fn uuid_value(value: &Value) -> Option<Uuid> {
    value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Distinguishes a missing key (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_present")]
        owner: Option<Option<String>>,
    }

    #[test]
    fn later_message_replaces_earlier() {
        let mut errors = FieldErrors::new();
        errors.set("cnpj", "first");
        errors.set("cnpj", "second");
        errors.set("email", "bad");

        let err = errors.into_error();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.message_for("cnpj"), Some("second"));
    }

    #[test]
    fn empty_accumulator_is_ok() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn has_reports_recorded_fields() {
        let mut errors = FieldErrors::new();
        errors.set("cnpj", "bad");

        assert!(errors.has("cnpj"));
        assert!(!errors.has("email"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn uuid_value_needs_a_uuid_string() {
        let id = Uuid::new_v4();
        assert_eq!(uuid_value(&Value::from(id.to_string())), Some(id));
        assert_eq!(uuid_value(&Value::from("abc")), None);
        assert_eq!(uuid_value(&Value::from(12)), None);
        assert_eq!(uuid_value(&Value::Bool(true)), None);
    }

    #[test]
    fn provided_ignores_blank_values() {
        assert_eq!(provided(&None), None);
        assert_eq!(provided(&Some("   ".to_string())), None);
        assert_eq!(provided(&Some(" abc ".to_string())), Some("abc"));
    }

    #[test]
    fn missing_key_differs_from_null() {
        let missing: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"owner": null}"#).unwrap();
        let value: Body = serde_json::from_str(r#"{"owner": "modrp"}"#).unwrap();

        assert_eq!(missing.owner, None);
        assert_eq!(null.owner, Some(None));
        assert_eq!(value.owner, Some(Some("modrp".to_string())));
    }
}
