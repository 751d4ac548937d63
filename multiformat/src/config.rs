//! Configuration types for parsing and writing.
//!
//! Both structs are `#[non_exhaustive]`: build them from `Default` and
//! override the fields you need.

/// Default maximum input size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;

/// Default JSON indentation width.
pub const DEFAULT_INDENT: usize = 2;

/// Options for loading and parsing an input file.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ParseConfig {
    /// Maximum input size in bytes (default: 10 MB).
    /// Larger files are rejected before they are fully read.
    pub max_file_size: u64,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Options for the JSON serializer.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct WriteConfig {
    /// Number of spaces per indentation level (default: 2).
    pub indent: usize,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}
