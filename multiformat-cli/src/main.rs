// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

use clap::Parser;
use multiformat_cli::cli::{self, Cli, EXIT_FAILURE, failure_report};
use multiformat_cli::logging;

fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here, on stdout.
            let code = if e.use_stderr() { EXIT_FAILURE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logging::init(args.verbose, args.quiet);

    let result = cli::run(&args)
        .and_then(|summary| cli::write_summary(&summary, &mut std::io::stdout().lock()));

    if let Err(err) = result {
        let (code, message) = failure_report(&err);
        eprintln!("{message}");
        std::process::exit(code);
    }
}
