//! Centralize `ERROR` lines from a directory of log files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, warn};

use crate::error::TidyError;

/// Substring that marks a line as an error line.
pub const ERROR_MARKER: &str = "ERROR";

/// Counts from a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// `*.log` files that were read.
    pub files_scanned: usize,
    /// Lines written to the output.
    pub errors_found: usize,
    /// Files skipped because they could not be read as UTF-8 text.
    pub unreadable_files: usize,
}

/// Copy every line containing [`ERROR_MARKER`] from the `*.log` files directly
/// inside `log_dir` into `output`, each prefixed with `"<file name>: "`.
///
/// Files are processed in sorted order and subdirectories are not searched.
/// `output` is truncated first; if it lives in `log_dir` it is not scanned.
///
/// # Errors
///
/// Returns `TidyError::NotFound` if `log_dir` is not a directory, and an I/O
/// error if the output cannot be written. Unreadable log files are skipped
/// with a warning, not reported as errors.
pub fn collect_errors(log_dir: &Path, output: &Path) -> Result<CollectReport, TidyError> {
    if !log_dir.is_dir() {
        return Err(TidyError::NotFound {
            path: log_dir.to_owned(),
        });
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| TidyError::io(parent, e))?;
    }
    let file = File::create(output).map_err(|e| TidyError::io(output, e))?;
    let own_output = output.canonicalize().ok();
    let mut writer = BufWriter::new(file);

    let mut report = CollectReport::default();
    for path in find_logs(log_dir)? {
        if own_output.is_some() && path.canonicalize().ok() == own_output {
            debug!(file = %path.display(), "skipping the output file");
            continue;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %path.display(), "skipping unreadable log: {e}");
                report.unreadable_files += 1;
                continue;
            }
        };
        report.files_scanned += 1;

        let name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        let before = report.errors_found;
        for line in content.lines().filter(|line| line.contains(ERROR_MARKER)) {
            writeln!(writer, "{name}: {line}").map_err(|e| TidyError::io(output, e))?;
            report.errors_found += 1;
        }
        debug!(
            file = %path.display(),
            errors = report.errors_found - before,
            "scanned log"
        );
    }
    writer.flush().map_err(|e| TidyError::io(output, e))?;

    info!(
        dir = %log_dir.display(),
        output = %output.display(),
        files = report.files_scanned,
        errors = report.errors_found,
        unreadable = report.unreadable_files,
        "collected log errors"
    );
    Ok(report)
}

/// Regular `*.log` files directly inside `dir`, sorted by path.
fn find_logs(dir: &Path) -> Result<Vec<PathBuf>, TidyError> {
    let pattern = format!("{}/*.log", Pattern::escape(&dir.to_string_lossy()));
    let entries = glob::glob(&pattern).map_err(|source| TidyError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!(file = %e.path().display(), "cannot inspect log entry: {e}"),
        }
    }
    files.sort();
    Ok(files)
}
