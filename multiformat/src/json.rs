//! JSON parsing.
//!
//! JSON payloads are opaque: only syntax is checked, the value tree is passed
//! through untouched. Numbers keep their source text, so integers wider than
//! 64 bits and exponents beyond `f64` range survive unchanged.

use serde_json::Value;

use crate::error::{ParseError, ParseErrorKind};
use crate::loader::RawInput;

/// Parse `input` as a JSON document.
///
/// # Errors
///
/// Returns an `InvalidJson` error carrying the syntax error and its
/// line/column.
pub fn parse_json(input: &RawInput) -> Result<Value, ParseError> {
    serde_json::from_str(input.as_str()).map_err(|e| {
        ParseError::new(ParseErrorKind::InvalidJson, format!("Invalid JSON: {e}"))
    })
}

/// Short name of a JSON value's type, as reported by the CLI.
#[must_use]
pub const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
