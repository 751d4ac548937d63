use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::{CleanConfig, clean_csv, collect_errors};

pub const DEFAULT_CSV_INPUT: &str = "data/data.csv";
pub const DEFAULT_CSV_OUTPUT: &str = "output/clean_data.csv";
pub const DEFAULT_LOG_DIR: &str = "raw_logs";
pub const DEFAULT_ERRORS_OUTPUT: &str = "output/errors.log";

/// Clean CSV exports and collect errors from log files.
#[derive(Debug, Parser)]
#[command(name = "multiformat-tidy", version, about, long_about = None)]
pub struct Cli {
    /// More diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean a ';'-separated CSV export into a ','-separated CSV
    Csv(CsvArgs),
    /// Copy every ERROR line of a log directory into one file
    Logs(LogsArgs),
    /// Run both steps with the default paths under a root directory
    All(AllArgs),
}

#[derive(Debug, Args)]
pub struct CsvArgs {
    /// CSV export to clean
    #[arg(default_value = DEFAULT_CSV_INPUT)]
    pub input: PathBuf,

    /// Where to write the cleaned CSV
    #[arg(default_value = DEFAULT_CSV_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Directory holding the *.log files
    #[arg(default_value = DEFAULT_LOG_DIR)]
    pub dir: PathBuf,

    /// Where to write the collected lines
    #[arg(default_value = DEFAULT_ERRORS_OUTPUT)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct AllArgs {
    /// Directory the default paths are resolved against
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Run the selected subcommand, printing a one-line summary per step.
///
/// # Errors
///
/// Returns the first failure of `csv` or `logs`. For `all`, both steps run
/// and the error lists every step that failed.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Csv(args) => run_csv(&args.input, &args.output, out),
        Commands::Logs(args) => run_logs(&args.dir, &args.output, out),
        Commands::All(args) => run_all(&args.root, out),
    }
}

fn run_csv(input: &Path, output: &Path, out: &mut dyn Write) -> Result<()> {
    let report = clean_csv(input, output, &CleanConfig::default())
        .with_context(|| format!("cleaning {} failed", input.display()))?;
    writeln!(
        out,
        "csv: kept {} of {} rows ({} empty, {} incomplete, {} malformed lines skipped) -> {}",
        report.kept_rows,
        report.rows_read,
        report.empty_rows,
        report.invalid_rows,
        report.malformed_rows,
        output.display()
    )?;
    Ok(())
}

fn run_logs(dir: &Path, output: &Path, out: &mut dyn Write) -> Result<()> {
    let report = collect_errors(dir, output)
        .with_context(|| format!("collecting errors from {} failed", dir.display()))?;
    writeln!(
        out,
        "logs: {} error lines from {} files ({} unreadable) -> {}",
        report.errors_found,
        report.files_scanned,
        report.unreadable_files,
        output.display()
    )?;
    Ok(())
}

fn run_all(root: &Path, out: &mut dyn Write) -> Result<()> {
    let steps = [
        run_csv(
            &root.join(DEFAULT_CSV_INPUT),
            &root.join(DEFAULT_CSV_OUTPUT),
            out,
        ),
        run_logs(
            &root.join(DEFAULT_LOG_DIR),
            &root.join(DEFAULT_ERRORS_OUTPUT),
            out,
        ),
    ];

    let failures: Vec<String> = steps
        .iter()
        .filter_map(|step| step.as_ref().err())
        .map(|e| format!("{e:#}"))
        .collect();
    if !failures.is_empty() {
        bail!("{}", failures.join("; "));
    }
    Ok(())
}
