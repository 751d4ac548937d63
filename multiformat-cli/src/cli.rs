use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use multiformat::{
    DEFAULT_INDENT, DEFAULT_MAX_FILE_SIZE, ParseConfig, ParseError, Parsed, WriteConfig,
    WriteError, parse_file, write_json,
};
use tracing::info;

/// Output path used when none is given on the command line.
pub const DEFAULT_OUTPUT: &str = "output/standard.json";

/// Exit code for any reported failure (bad input, unwritable output).
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for failures outside the error taxonomy.
pub const EXIT_INTERNAL: i32 = 2;

/// Parse a JSON or XML file and save it as standard JSON.
#[derive(Debug, Parser)]
#[command(name = "multiformat", version, about, long_about = None)]
pub struct Cli {
    /// Input file; JSON if it starts with '{' or '[', XML if it starts with '<'
    pub input_file: PathBuf,

    /// Where to write the JSON result
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output_file: PathBuf,

    /// More diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Reject input files larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Spaces per indentation level in the output
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,
}

/// What a successful run did.
#[derive(Debug)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub parsed: Parsed,
}

/// Parse `cli.input_file` and write it to `cli.output_file`.
///
/// Nothing is written when parsing fails.
///
/// # Errors
///
/// Returns the `ParseError` or `WriteError` that aborted the run, wrapped in
/// `anyhow`. Use [`failure_report`] to turn it into an exit code and message.
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let mut parse_config = ParseConfig::default();
    parse_config.max_file_size = cli.max_file_size;
    let mut write_config = WriteConfig::default();
    write_config.indent = cli.indent;

    let parsed = parse_file(&cli.input_file, &parse_config)?;
    info!(
        input = %cli.input_file.display(),
        format = %parsed.format(),
        kind = parsed.kind_name(),
        "parsed input"
    );

    write_json(&parsed, &cli.output_file, &write_config)?;

    Ok(RunSummary {
        input: cli.input_file.clone(),
        output: cli.output_file.clone(),
        parsed,
    })
}

/// Print the run summary: input file, result type, data and output path.
///
/// # Errors
///
/// Returns an error if the data cannot be rendered or writing fails.
pub fn write_summary(summary: &RunSummary, writer: &mut dyn Write) -> Result<()> {
    let data = serde_json::to_string(&summary.parsed).context("failed to render parsed data")?;
    writeln!(writer)?;
    writeln!(writer, "File:  {}", summary.input.display())?;
    writeln!(
        writer,
        "Type:  {} ({})",
        summary.parsed.kind_name(),
        summary.parsed.format()
    )?;
    writeln!(writer, "Data:  {data}")?;
    writeln!(writer, "Saved: {}", summary.output.display())?;
    Ok(())
}

/// Exit code and message for a failed run.
///
/// Pipeline and write errors are reported failures (`EXIT_FAILURE`); anything
/// else is an internal defect (`EXIT_INTERNAL`) and is labelled as such.
#[must_use]
pub fn failure_report(err: &anyhow::Error) -> (i32, String) {
    if let Some(parse_err) = err.downcast_ref::<ParseError>() {
        return (
            EXIT_FAILURE,
            format!(
                "Error [{}/{}]: {}",
                parse_err.stage(),
                parse_err.kind,
                parse_err.message
            ),
        );
    }
    if let Some(write_err) = err.downcast_ref::<WriteError>() {
        return (EXIT_FAILURE, format!("Error [write]: {write_err}"));
    }
    (EXIT_INTERNAL, format!("Internal error: {err:#}"))
}
