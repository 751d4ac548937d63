//! CSV export cleaning and log error collection.
//!
//! Two independent jobs share this crate:
//!
//! - [`clean_csv`] normalizes a `;`-separated client export into a clean
//!   `,`-separated CSV, dropping empty and incomplete rows.
//! - [`collect_errors`] gathers every `ERROR` line from a directory of
//!   `*.log` files into one file.

pub mod cli;
mod config;
mod csv_clean;
mod error;
mod log_collect;
pub mod logging;

pub use config::CleanConfig;
pub use csv_clean::coerce;
pub use csv_clean::{CleanReport, clean_csv};
pub use error::TidyError;
pub use log_collect::{CollectReport, ERROR_MARKER, collect_errors};
