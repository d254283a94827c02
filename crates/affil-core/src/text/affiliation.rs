//! Whitespace and separator cleanup for raw affiliation strings

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::patterns::collapse_whitespace;

lazy_static! {
    static ref SPACE_BEFORE_COMMA: Regex = Regex::new(r"\s+,").unwrap();
}

/// Raised when an affiliation field holds something other than text.
///
/// This signals malformed upstream data and is not recovered from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Affiliation must be a string, not {found}. Affiliation: {value}")]
    NotAString { found: &'static str, value: String },
}

/// Clean up an affiliation string.
///
/// - Newlines become `"; "`
/// - Whitespace before a comma is removed
/// - Whitespace runs collapse to one space
/// - Leading and trailing whitespace is trimmed
pub fn clean_affiliation(text: Option<&str>) -> Option<String> {
    text.map(clean_text)
}

/// Clean an affiliation field of unknown type.
///
/// `null` passes through as `None`; any other non-string value is a
/// `NormalizeError::NotAString`.
pub fn clean_affiliation_value(value: &Value) -> Result<Option<String>, NormalizeError> {
    Ok(clean_affiliation(expect_text(value)?))
}

/// View a field as optional text, rejecting non-string values.
pub(crate) fn expect_text(value: &Value) -> Result<Option<&str>, NormalizeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        other => Err(NormalizeError::NotAString {
            found: json_type_name(other),
            value: other.to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn clean_text(text: &str) -> String {
    let text = text.replace('\n', "; ");
    let text = SPACE_BEFORE_COMMA.replace_all(&text, ",");
    collapse_whitespace(&text).trim().to_string()
}
