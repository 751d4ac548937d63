//! Error types for the record parsing pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// The pipeline stage a [`ParseError`] originated from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Reading the input file.
    Load,
    /// Detecting the serialization format.
    Detect,
    /// Parsing a JSON document.
    Json,
    /// Parsing and validating an XML book document.
    Xml,
}

impl Stage {
    /// Stable lowercase name, used in CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Detect => "detect",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of failure that aborted a parse.
///
/// Every kind is fatal to the current run. The stage is derived from the kind,
/// so an error can never be tagged with a stage it did not come from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The input path does not exist.
    NotFound,
    /// An I/O error occurred while opening or reading the input.
    Unreadable,
    /// The input exceeded the configured maximum size.
    FileTooLarge,
    /// The input is not valid UTF-8.
    InvalidEncoding,
    /// The input is blank once surrounding whitespace is trimmed.
    EmptyContent,
    /// The content starts with neither a JSON nor an XML marker.
    UnknownFormat,
    /// The content is not syntactically valid JSON.
    InvalidJson,
    /// The content is not well-formed XML.
    InvalidXml,
    /// A `book` element lacks one of `id`, `title`, `author`.
    MissingField,
    /// A required `book` field has no text, or only whitespace.
    EmptyField,
    /// The `id` field of a `book` is not an integer.
    InvalidId,
}

impl ParseErrorKind {
    /// The pipeline stage that produces this kind of error.
    #[must_use]
    pub const fn stage(self) -> Stage {
        match self {
            Self::NotFound
            | Self::Unreadable
            | Self::FileTooLarge
            | Self::InvalidEncoding
            | Self::EmptyContent => Stage::Load,
            Self::UnknownFormat => Stage::Detect,
            Self::InvalidJson => Stage::Json,
            Self::InvalidXml | Self::MissingField | Self::EmptyField | Self::InvalidId => {
                Stage::Xml
            }
        }
    }

    /// Stable `snake_case` name, used in CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unreadable => "unreadable",
            Self::FileTooLarge => "file_too_large",
            Self::InvalidEncoding => "invalid_encoding",
            Self::EmptyContent => "empty_content",
            Self::UnknownFormat => "unknown_format",
            Self::InvalidJson => "invalid_json",
            Self::InvalidXml => "invalid_xml",
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::InvalidId => "invalid_id",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure anywhere in the load → detect → parse pipeline.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[error("{message}")]
#[non_exhaustive]
pub struct ParseError {
    /// The kind of failure.
    pub kind: ParseErrorKind,
    /// Human-readable description, including the underlying parser's message
    /// where there is one.
    pub message: String,
    /// The input file, when the pipeline was started from a path.
    pub file: Option<PathBuf>,
}

impl ParseError {
    /// Create an error that is not yet associated with a file.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
        }
    }

    /// Attach the input file the error was raised for.
    #[must_use]
    pub fn with_file(mut self, path: &Path) -> Self {
        self.file = Some(path.to_owned());
        self
    }

    /// The pipeline stage this error originated from.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.kind.stage()
    }

    /// Format the error for human-readable output.
    ///
    /// `{file}: [{stage}/{kind}] {message}`, or without the file prefix when
    /// the input did not come from disk.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.file {
            Some(file) => format!(
                "{}: [{}/{}] {}",
                file.display(),
                self.stage(),
                self.kind,
                self.message
            ),
            None => format!("[{}/{}] {}", self.stage(), self.kind, self.message),
        }
    }
}

/// A failure while writing the JSON output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
    /// The output's parent directory could not be created.
    #[error("failed to create directory {path}: {source}", path = .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("failed to write {path}: {source}", path = .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be encoded as JSON.
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}
