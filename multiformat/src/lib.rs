//! # multiformat
//!
//! Record parser and validator for JSON and XML files.
//!
//! The pipeline is linear and fails fast: a file is loaded into a trimmed,
//! non-empty [`RawInput`], its format is detected from the first character,
//! and it is parsed either into an opaque JSON value or into validated
//! [`BookRecord`]s. The result can be written back as canonical JSON.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use multiformat::{ParseConfig, WriteConfig, parse_file, write_json};
//!
//! let parsed = parse_file(Path::new("data/books.xml"), &ParseConfig::default())?;
//! println!("Parsed {} from {}", parsed.kind_name(), parsed.format());
//! write_json(&parsed, Path::new("output/standard.json"), &WriteConfig::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod document;
mod error;
mod format;
mod json;
mod loader;
mod output;
mod xml;

pub use config::{DEFAULT_INDENT, DEFAULT_MAX_FILE_SIZE, ParseConfig, WriteConfig};
pub use document::{Parsed, parse_file, parse_input, parse_str};
pub use error::{ParseError, ParseErrorKind, Stage, WriteError};
pub use format::{FormatTag, detect_format};
pub use json::{parse_json, value_kind};
pub use loader::{RawInput, load};
pub use output::{ensure_parent_dir, to_pretty_string, write_json};
pub use xml::{BookRecord, parse_books};
