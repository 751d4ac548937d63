//! Input loading.
//!
//! Reads a file with a bounded streaming read and turns it into a [`RawInput`]:
//! trimmed, non-empty UTF-8 text. Every failure maps onto a load-stage
//! [`ParseErrorKind`].

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

use crate::config::ParseConfig;
use crate::error::{ParseError, ParseErrorKind};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Validated input text: never empty, no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput(String);

impl RawInput {
    /// Validate in-memory text.
    ///
    /// A leading byte order mark is dropped before trimming.
    ///
    /// # Errors
    ///
    /// Returns an `EmptyContent` error if nothing is left after trimming.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim_start_matches(BYTE_ORDER_MARK).trim();
        if trimmed.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::EmptyContent,
                "Empty file: no content after trimming whitespace",
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RawInput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read `path` into a [`RawInput`].
///
/// Uses `Read::take` so an oversized file is never pulled fully into memory.
///
/// # Errors
///
/// Every returned error carries `path` and one of:
/// - `NotFound` if the path does not exist
/// - `Unreadable` for any other I/O failure (including directories)
/// - `FileTooLarge` if the file exceeds `config.max_file_size`
/// - `InvalidEncoding` if the content is not UTF-8
/// - `EmptyContent` if the content is blank once trimmed
pub fn load(path: &Path, config: &ParseConfig) -> Result<RawInput, ParseError> {
    let content = read_bounded(path, config.max_file_size).map_err(|e| e.with_file(path))?;
    let input = RawInput::from_text(&content).map_err(|e| e.with_file(path))?;
    debug!(
        path = %path.display(),
        bytes = input.as_str().len(),
        "loaded input"
    );
    Ok(input)
}

fn read_bounded(path: &Path, max_file_size: u64) -> Result<String, ParseError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ParseError::new(
                ParseErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        } else {
            ParseError::new(
                ParseErrorKind::Unreadable,
                format!("Failed to open file: {e}"),
            )
        }
    })?;

    // One byte past the limit is enough to tell an oversized file apart.
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ParseError::new(
                ParseErrorKind::Unreadable,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ParseError::new(
            ParseErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|e| {
        ParseError::new(
            ParseErrorKind::InvalidEncoding,
            format!(
                "File is not valid UTF-8 (invalid byte at offset {})",
                e.utf8_error().valid_up_to()
            ),
        )
    })
}
