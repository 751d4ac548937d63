//! Configuration for the CSV cleaner.

/// Column roles and parsing options for [`crate::clean_csv`].
///
/// Column names are matched after header normalization (trimmed, lowercase,
/// spaces replaced by `_`). Columns listed here but absent from a file are
/// ignored.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CleanConfig {
    /// Input field separator (default: `;`).
    pub input_delimiter: u8,
    /// Output field separator (default: `,`).
    pub output_delimiter: u8,
    /// Raw cell values treated as missing, compared exactly.
    pub missing_markers: Vec<String>,
    /// Monetary columns: currency sign, quotes and spaces removed, decimal comma accepted.
    pub amount_columns: Vec<String>,
    /// Integer age columns, rejected outside `min_age..=max_age`.
    pub age_columns: Vec<String>,
    pub min_age: f64,
    pub max_age: f64,
    /// Day-first date columns.
    pub date_columns: Vec<String>,
    /// A row missing any of these (after coercion) is dropped.
    pub critical_columns: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input_delimiter: b';',
            output_delimiter: b',',
            missing_markers: owned(&["", "N/A", "NA", " "]),
            amount_columns: owned(&["montant_total_eur"]),
            age_columns: owned(&["age"]),
            min_age: 0.0,
            max_age: 100.0,
            date_columns: owned(&["date_inscription", "derniere_connexion"]),
            critical_columns: owned(&["id_client", "nom", "montant_total_eur", "age"]),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}
