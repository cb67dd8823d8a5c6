//! Per-field validation rules and the structured error list they
//! produce.
//!
//! Wording follows the classic framework defaults ("The email has
//! already been taken.") so the messages read the way API consumers
//! expect from a validation layer.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::GuestError;

/// Maximum accepted length for name fields, in characters.
pub const MAX_NAME_LEN: usize = 255;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Field name → human-readable failure messages. Serializes as a plain
/// JSON object, one message list per invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn messages_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Required string field capped at [`MAX_NAME_LEN`] characters.
pub fn check_name(field: &str, value: Option<&str>, errors: &mut ValidationErrors) {
    match value {
        None | Some("") => errors.add(field, required_message(field)),
        Some(v) if v.chars().count() > MAX_NAME_LEN => errors.add(
            field,
            format!("The {field} may not be greater than {MAX_NAME_LEN} characters."),
        ),
        Some(_) => {}
    }
}

/// Required field that must look like an email address.
pub fn check_email(field: &str, value: Option<&str>, errors: &mut ValidationErrors) {
    match value {
        None | Some("") => errors.add(field, required_message(field)),
        Some(v) if !EMAIL_RE.is_match(v) => {
            errors.add(field, format!("The {field} must be a valid email address."));
        }
        Some(_) => {}
    }
}

/// Required string field with no further format constraints.
pub fn check_required(field: &str, value: Option<&str>, errors: &mut ValidationErrors) {
    if matches!(value, None | Some("")) {
        errors.add(field, required_message(field));
    }
}

/// Message for a failed uniqueness pre-check.
pub fn taken_message(field: &str) -> String {
    format!("The {field} has already been taken.")
}

fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

/// Parse a path identifier. Ids are base-10 integers greater than zero;
/// anything else is rejected before any lookup happens, distinct from
/// "no such guest".
pub fn parse_guest_id(raw: &str) -> Result<i64, GuestError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(GuestError::InvalidIdentifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_are_required() {
        let mut errors = ValidationErrors::new();
        check_name("firstname", None, &mut errors);
        check_name("lastname", Some(""), &mut errors);
        assert_eq!(
            errors.messages_for("firstname"),
            ["The firstname field is required."]
        );
        assert_eq!(
            errors.messages_for("lastname"),
            ["The lastname field is required."]
        );
    }

    #[test]
    fn test_name_length_cap() {
        let mut errors = ValidationErrors::new();
        let at_cap = "x".repeat(255);
        check_name("firstname", Some(at_cap.as_str()), &mut errors);
        assert!(errors.is_empty());

        let over_cap = "x".repeat(256);
        check_name("firstname", Some(over_cap.as_str()), &mut errors);
        assert_eq!(
            errors.messages_for("firstname"),
            ["The firstname may not be greater than 255 characters."]
        );
    }

    #[test]
    fn test_email_format() {
        let mut errors = ValidationErrors::new();
        check_email("email", Some("ivan@example.com"), &mut errors);
        assert!(errors.is_empty());

        for bad in ["not-an-email", "a@b", "@example.com", "a b@example.com"] {
            let mut errors = ValidationErrors::new();
            check_email("email", Some(bad), &mut errors);
            assert_eq!(
                errors.messages_for("email"),
                ["The email must be a valid email address."],
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        check_required("phone", None, &mut errors);
        errors.add("email", taken_message("email"));

        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "email": ["The email has already been taken."],
                "phone": ["The phone field is required."],
            })
        );
    }

    #[test]
    fn test_parse_guest_id_accepts_positive_integers() {
        assert_eq!(parse_guest_id("1").unwrap(), 1);
        assert_eq!(parse_guest_id("420").unwrap(), 420);
    }

    #[test]
    fn test_parse_guest_id_rejects_malformed_input() {
        for raw in ["abc", "", "1.5", "0x10", "-3", "0", " 1", "9223372036854775808"] {
            assert!(
                matches!(parse_guest_id(raw), Err(GuestError::InvalidIdentifier)),
                "expected {raw:?} to be rejected"
            );
        }
    }
}
