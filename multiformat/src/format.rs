//! Format detection from the first character of the input.

use std::fmt;

use serde::Serialize;

use crate::error::{ParseError, ParseErrorKind};
use crate::loader::RawInput;

/// Serialization format of an input.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Json,
    Xml,
}

impl FormatTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the format of `input`: `{` or `[` is JSON, `<` is XML.
///
/// # Errors
///
/// Returns an `UnknownFormat` error for any other leading character.
pub fn detect_format(input: &RawInput) -> Result<FormatTag, ParseError> {
    match input.as_str().chars().next() {
        Some('{' | '[') => Ok(FormatTag::Json),
        Some('<') => Ok(FormatTag::Xml),
        Some(other) => Err(ParseError::new(
            ParseErrorKind::UnknownFormat,
            format!(
                "Unknown format: content starts with '{}', expected '{{', '[' (JSON) or '<' (XML)",
                other.escape_default()
            ),
        )),
        None => Err(ParseError::new(
            ParseErrorKind::EmptyContent,
            "Empty file: no content after trimming whitespace",
        )),
    }
}
