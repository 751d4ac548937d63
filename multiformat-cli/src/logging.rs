//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. The level comes from the
//! command-line flags only; the environment is not consulted.

use tracing_subscriber::EnvFilter;

/// Crates whose events are shown.
const LOG_TARGETS: &[&str] = &["multiformat", "multiformat_cli"];

/// Map `-v`/`-q` flags to a level: `warn` by default, `-q` for errors only,
/// each `-v` one step more detailed.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter directive string for `level`.
#[must_use]
pub fn filter_directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::new(filter_directives(level_for(verbose, quiet)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(7, false), "trace");
        assert_eq!(level_for(3, true), "error");
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(
            filter_directives("debug"),
            "multiformat=debug,multiformat_cli=debug"
        );
    }
}
