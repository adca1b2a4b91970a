//! Type-tag validators for mapped field values.
//!
//! A fixed mapping from declared field type to a predicate over the field's
//! value. `boolean` and `relation` are not actually validated; `email` and
//! `date` match cached regular expressions.

use std::sync::OnceLock;

use regex::Regex;

use crate::field::FieldType;
use crate::instance::FieldValue;

/// The email shape accepted by the `email` validator (RFC-2822-ish).
const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

/// RFC 3339 date or datetime, the wire shape of a mapped date field.
const DATE_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}([T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?)?$";

/// Compile a pattern once, caching it for the lifetime of the program.
///
/// An uncompilable pattern logs a warning and yields `None`; validation stays
/// resilient and treats it as a non-match.
fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(
                pattern = pattern,
                error = %e,
                "Invalid validator pattern, treating as non-match"
            );
            None
        }
    })
    .as_ref()
}

fn email_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, EMAIL_PATTERN)
}

fn date_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, DATE_PATTERN)
}

fn scalar_str(value: &FieldValue) -> Option<&str> {
    value.as_scalar().and_then(|v| v.as_str())
}

/// The value is a JSON string.
#[must_use]
pub fn is_string(value: &FieldValue) -> bool {
    scalar_str(value).is_some()
}

/// The value is a JSON number (the original validates `int` and `float`
/// with the same numeric check).
#[must_use]
pub fn is_number(value: &FieldValue) -> bool {
    value.as_scalar().is_some_and(serde_json::Value::is_number)
}

/// The value is a string matching the email pattern.
#[must_use]
pub fn is_email(value: &FieldValue) -> bool {
    match (scalar_str(value), email_regex()) {
        (Some(s), Some(re)) => re.is_match(s),
        _ => false,
    }
}

/// The value is a string in RFC 3339 date/datetime shape.
#[must_use]
pub fn is_date(value: &FieldValue) -> bool {
    match (scalar_str(value), date_regex()) {
        (Some(s), Some(re)) => re.is_match(s),
        _ => false,
    }
}

/// Run the predicate registered for a declared field type.
#[must_use]
pub fn check(field_type: FieldType, value: &FieldValue) -> bool {
    match field_type {
        FieldType::String => is_string(value),
        FieldType::Int | FieldType::Float => is_number(value),
        FieldType::Email => is_email(value),
        FieldType::Date => is_date(value),
        // Not actually validated.
        FieldType::Boolean | FieldType::Relation => true,
    }
}
