//! Stderr logging for `multiformat-tidy`.

use tracing_subscriber::EnvFilter;

/// `warn` by default, `error` with `-q`, one level more per `-v`.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber for this crate's events. Later calls are ignored.
pub fn init(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("multiformat_tidy={level}")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
