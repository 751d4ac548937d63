//! Pipeline dispatch: load → detect → parse.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ParseConfig;
use crate::error::ParseError;
use crate::format::{FormatTag, detect_format};
use crate::json::{parse_json, value_kind};
use crate::loader::{RawInput, load};
use crate::xml::{BookRecord, parse_books};

/// The result of a successful parse.
///
/// Serializes as the bare value, so a `Parsed` can be handed straight to
/// [`crate::write_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parsed {
    /// An opaque JSON value tree.
    Json(Value),
    /// Validated records from an XML book document.
    Books(Vec<BookRecord>),
}

impl Parsed {
    /// The format the result was parsed from.
    #[must_use]
    pub const fn format(&self) -> FormatTag {
        match self {
            Self::Json(_) => FormatTag::Json,
            Self::Books(_) => FormatTag::Xml,
        }
    }

    /// Short description of the result's shape: the JSON value type, or
    /// `books` for XML records.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Json(value) => value_kind(value),
            Self::Books(_) => "books",
        }
    }

    /// The records, if this is an XML result.
    #[must_use]
    pub fn as_books(&self) -> Option<&[BookRecord]> {
        match self {
            Self::Books(books) => Some(books),
            Self::Json(_) => None,
        }
    }

    /// The value tree, if this is a JSON result.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Books(_) => None,
        }
    }
}

/// Parse the file at `path`.
///
/// # Errors
///
/// Returns the first failure of any stage, with `path` attached. See
/// [`crate::ParseErrorKind`] for the full list.
pub fn parse_file(path: &Path, config: &ParseConfig) -> Result<Parsed, ParseError> {
    let input = load(path, config)?;
    parse_input(&input).map_err(|e| e.with_file(path))
}

/// Parse in-memory text through the same pipeline as [`parse_file`].
///
/// # Errors
///
/// Returns `EmptyContent` for blank text, otherwise the first detection or
/// parse failure.
pub fn parse_str(text: &str) -> Result<Parsed, ParseError> {
    let input = RawInput::from_text(text)?;
    parse_input(&input)
}

/// Detect the format of an already loaded input and parse it.
///
/// # Errors
///
/// Returns an `UnknownFormat` error or the parser's failure.
pub fn parse_input(input: &RawInput) -> Result<Parsed, ParseError> {
    let format = detect_format(input)?;
    debug!(%format, bytes = input.as_str().len(), "detected input format");

    match format {
        FormatTag::Json => parse_json(input).map(Parsed::Json),
        FormatTag::Xml => parse_books(input).map(Parsed::Books),
    }
}
