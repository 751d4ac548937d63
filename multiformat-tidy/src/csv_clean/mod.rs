//! CSV export cleaning.
//!
//! Reads a delimited export with every field as text, normalizes the header,
//! coerces amount/age/date columns (invalid values become missing), drops
//! fully empty rows and rows missing a critical column, and writes the rest.
//! The whole file is read before anything is written.

pub mod coerce;

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use crate::config::CleanConfig;
use crate::error::TidyError;
use coerce::{
    normalize_header, parse_age, parse_amount, parse_date, render_age, render_amount, render_date,
};

/// Row counts from a cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Data rows read with an acceptable field count.
    pub rows_read: usize,
    /// Lines skipped because they had more fields than the header, or bad encoding.
    pub malformed_rows: usize,
    /// Rows dropped because every cell was missing.
    pub empty_rows: usize,
    /// Rows dropped because a critical column was missing or invalid.
    pub invalid_rows: usize,
    /// Rows written to the output.
    pub kept_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Text,
    Amount,
    Age,
    Date,
}

/// Normalized header with the role of each column.
struct Columns {
    names: Vec<String>,
    kinds: Vec<ColumnKind>,
    critical: Vec<usize>,
}

impl Columns {
    fn new(header: &StringRecord, config: &CleanConfig) -> Self {
        let names: Vec<String> = header.iter().map(normalize_header).collect();
        let kinds = names
            .iter()
            .map(|name| {
                let listed = |columns: &[String]| columns.iter().any(|c| c == name);
                if listed(&config.amount_columns) {
                    ColumnKind::Amount
                } else if listed(&config.age_columns) {
                    ColumnKind::Age
                } else if listed(&config.date_columns) {
                    ColumnKind::Date
                } else {
                    ColumnKind::Text
                }
            })
            .collect();
        let critical = names
            .iter()
            .enumerate()
            .filter(|(_, name)| config.critical_columns.contains(*name))
            .map(|(index, _)| index)
            .collect();

        Self {
            names,
            kinds,
            critical,
        }
    }

    fn len(&self) -> usize {
        self.names.len()
    }

    /// Coerce one record. Short records are padded with missing cells.
    fn coerce(&self, record: &StringRecord, config: &CleanConfig) -> Vec<Option<String>> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                let raw = record.get(index)?;
                if config.missing_markers.iter().any(|m| m == raw) {
                    return None;
                }
                match kind {
                    ColumnKind::Text => Some(raw.to_owned()),
                    ColumnKind::Amount => parse_amount(raw).map(render_amount),
                    ColumnKind::Age => {
                        parse_age(raw, config.min_age, config.max_age).map(render_age)
                    }
                    ColumnKind::Date => parse_date(raw).map(render_date),
                }
            })
            .collect()
    }
}

/// Clean the CSV at `input` and write the result to `output`.
///
/// The output's parent directory is created if needed.
///
/// # Errors
///
/// Returns `TidyError::NotFound` if `input` does not exist, and a CSV or I/O
/// error if reading or writing fails. Individual bad lines are skipped, not
/// reported as errors.
pub fn clean_csv(
    input: &Path,
    output: &Path,
    config: &CleanConfig,
) -> Result<CleanReport, TidyError> {
    if !input.exists() {
        return Err(TidyError::NotFound {
            path: input.to_owned(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(config.input_delimiter)
        .flexible(true)
        .from_path(input)
        .map_err(|e| TidyError::csv(input, e))?;
    let columns = Columns::new(
        reader.headers().map_err(|e| TidyError::csv(input, e))?,
        config,
    );
    debug!(columns = ?columns.names, "normalized CSV header");

    let mut report = CleanReport::default();
    let mut kept: Vec<Vec<Option<String>>> = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!(file = %input.display(), "skipping line with invalid UTF-8: {e}");
                report.malformed_rows += 1;
                continue;
            }
            Err(e) => return Err(TidyError::csv(input, e)),
        };

        if record.len() > columns.len() {
            warn!(
                file = %input.display(),
                line = record.position().map_or(0, csv::Position::line),
                fields = record.len(),
                expected = columns.len(),
                "skipping malformed line"
            );
            report.malformed_rows += 1;
            continue;
        }
        report.rows_read += 1;

        let row = columns.coerce(&record, config);
        if row.iter().all(Option::is_none) {
            report.empty_rows += 1;
            continue;
        }
        if columns.critical.iter().any(|&index| row[index].is_none()) {
            report.invalid_rows += 1;
            continue;
        }
        kept.push(row);
    }

    report.kept_rows = kept.len();
    write_rows(output, &columns.names, &kept, config)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        kept = report.kept_rows,
        empty = report.empty_rows,
        invalid = report.invalid_rows,
        malformed = report.malformed_rows,
        "cleaned CSV"
    );
    Ok(report)
}

fn write_rows(
    output: &Path,
    header: &[String],
    rows: &[Vec<Option<String>>],
    config: &CleanConfig,
) -> Result<(), TidyError> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| TidyError::io(parent, e))?;
    }

    let mut writer = WriterBuilder::new()
        .delimiter(config.output_delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_path(output)
        .map_err(|e| TidyError::csv(output, e))?;

    writer
        .write_record(header)
        .map_err(|e| TidyError::csv(output, e))?;
    for row in rows {
        writer
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
            .map_err(|e| TidyError::csv(output, e))?;
    }
    writer.flush().map_err(|e| TidyError::io(output, e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn clean(content: &str) -> (CleanReport, String) {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("data.csv");
        let output = tmp.path().join("out").join("clean.csv");
        fs::write(&input, content).unwrap();
        let report = clean_csv(&input, &output, &CleanConfig::default()).unwrap();
        (report, fs::read_to_string(&output).unwrap())
    }

    #[test]
    fn test_header_is_normalized() {
        let (_, out) = clean("ID Client;Nom;Montant Total EUR;Age\n1;Ada;10;30\n");
        assert_eq!(out, "id_client,nom,montant_total_eur,age\n1,Ada,10.0,30\n");
    }

    #[test]
    fn test_empty_and_invalid_rows_are_dropped() {
        let content = "\
id_client;nom;montant_total_eur;age;ville
1;Ada;12,50;36;Paris
;;;;
N/A;NA;;;
2;Bob;XYZ;40;Lyon
3;Cy;5;-4;Nice
4;Dee;7;101;Lille
5;Eve;8;;Metz
";
        let (report, out) = clean(content);
        assert_eq!(report.rows_read, 7);
        assert_eq!(report.empty_rows, 2);
        assert_eq!(report.invalid_rows, 4);
        assert_eq!(report.kept_rows, 1);
        assert_eq!(
            out,
            "id_client,nom,montant_total_eur,age,ville\n1,Ada,12.5,36,Paris\n"
        );
    }

    #[test]
    fn test_non_critical_missing_is_kept_empty() {
        let (report, out) = clean("id_client;nom;montant_total_eur;age;ville\n1;Ada;3;20;N/A\n");
        assert_eq!(report.kept_rows, 1);
        assert_eq!(out, "id_client,nom,montant_total_eur,age,ville\n1,Ada,3.0,20,\n");
    }

    #[test]
    fn test_long_lines_are_skipped_and_short_lines_padded() {
        let content = "id_client;nom;montant_total_eur;age;ville\n1;Ada;3;20;Paris;extra\n2;Bob;4;21\n";
        let (report, out) = clean(content);
        assert_eq!(report.malformed_rows, 1);
        assert_eq!(report.rows_read, 1);
        assert_eq!(out, "id_client,nom,montant_total_eur,age,ville\n2,Bob,4.0,21,\n");
    }

    #[test]
    fn test_dates_are_coerced() {
        let content = "\
id_client;nom;montant_total_eur;age;date_inscription;derniere_connexion
1;Ada;3;20;05/01/2023;2023-02-01 10:15
2;Bob;4;21;pas une date;31/12/2022
";
        let (report, out) = clean(content);
        assert_eq!(report.kept_rows, 2);
        assert_eq!(
            out,
            "id_client,nom,montant_total_eur,age,date_inscription,derniere_connexion\n\
             1,Ada,3.0,20,2023-01-05,2023-02-01 10:15:00\n\
             2,Bob,4.0,21,,2022-12-31\n"
        );
    }

    #[test]
    fn test_fields_with_delimiter_are_quoted() {
        let (_, out) = clean("id_client;nom;montant_total_eur;age\n1;Doe, Jane;3;20\n");
        assert_eq!(out, "id_client,nom,montant_total_eur,age\n1,\"Doe, Jane\",3.0,20\n");
    }

    #[test]
    fn test_missing_input() {
        let tmp = TempDir::new().unwrap();
        let err = clean_csv(
            &tmp.path().join("absent.csv"),
            &tmp.path().join("out.csv"),
            &CleanConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TidyError::NotFound { .. }));
        assert!(!tmp.path().join("out.csv").exists());
    }
}
