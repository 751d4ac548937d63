//! Cell-level coercions.
//!
//! Each parser returns `None` for a value that cannot be coerced; the caller
//! treats that cell as missing.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

const EURO_SIGN: char = '\u{20ac}';

/// Day-first date layouts, then ISO.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// `" Montant Total EUR "` → `"montant_total_eur"`.
#[must_use]
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Parse a monetary amount such as `"1 234,50 €"`.
///
/// Euro signs, double quotes and spaces are removed and a decimal comma
/// becomes a point. Non-finite results are rejected.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(*c, EURO_SIGN | '"' | ' '))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render an amount the way a float column is exported: integral values keep
/// a trailing `.0`.
#[must_use]
pub fn render_amount(value: f64) -> String {
    let rendered = value.to_string();
    if rendered.contains(['.', 'e', 'E']) {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

/// Parse an age and round it to the nearest integer (ties to even).
///
/// Values outside `min..=max` are rejected before rounding.
#[must_use]
pub fn parse_age(raw: &str, min: f64, max: f64) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value < min || value > max {
        return None;
    }
    Some(value.round_ties_even())
}

/// Render a rounded age without a fractional part.
#[must_use]
pub fn render_age(value: f64) -> String {
    // Display drops the fraction of integral floats: 42.0 -> "42".
    value.to_string()
}

/// Parse a day-first date, optionally followed by a time.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for date_format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, date_format) {
            return date.and_hms_opt(0, 0, 0);
        }
        for time_format in TIME_FORMATS {
            let layout = format!("{date_format} {time_format}");
            if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, &layout) {
                return Some(datetime);
            }
        }
    }
    // ISO 8601 with a `T` separator.
    raw.parse::<NaiveDateTime>().ok()
}

/// `YYYY-MM-DD`, with ` HH:MM:SS` appended only when there is a time of day.
#[must_use]
pub fn render_date(value: NaiveDateTime) -> String {
    if value.hour() == 0 && value.minute() == 0 && value.second() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
