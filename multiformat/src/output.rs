//! Canonical JSON output.
//!
//! Indented with `WriteConfig::indent` spaces, non-ASCII characters written
//! as-is, no trailing newline. The value is fully encoded before the
//! filesystem is touched, so an encoding failure never leaves a partial file.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::config::WriteConfig;
use crate::error::WriteError;

/// Render `value` as indented JSON.
///
/// # Errors
///
/// Returns `WriteError::Encode` if the value cannot be represented as JSON
/// (e.g. a map with non-string keys).
pub fn to_pretty_string<T>(value: &T, config: &WriteConfig) -> Result<String, WriteError>
where
    T: Serialize + ?Sized,
{
    let indent = " ".repeat(config.indent);
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| WriteError::Encode(serde_json::Error::custom(e)))
}

/// Write `value` as indented JSON to `path`, creating missing parent
/// directories. An existing file is overwritten.
///
/// # Errors
///
/// Returns an error if encoding fails, the parent directory cannot be
/// created, or the file cannot be written.
pub fn write_json<T>(value: &T, path: &Path, config: &WriteConfig) -> Result<(), WriteError>
where
    T: Serialize + ?Sized,
{
    let rendered = to_pretty_string(value, config)?;
    ensure_parent_dir(path)?;
    fs::write(path, &rendered).map_err(|source| WriteError::Write {
        path: path.to_owned(),
        source,
    })?;
    info!(
        path = %path.display(),
        bytes = rendered.len(),
        "wrote JSON output"
    );
    Ok(())
}

/// Create the parent directory of `path` if it does not exist yet.
///
/// Idempotent; a bare file name has no parent to create.
///
/// # Errors
///
/// Returns `WriteError::CreateDir` if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_owned(),
            source,
        })?;
    }
    Ok(())
}
