//! Report description derived from the export preamble.

use crate::header::FileHeaders;

pub const NAME_KEY: &str = "Name";
pub const DATE_KEY: &str = "Datum";
pub const START_DATE_KEY: &str = "Startdatum";
pub const END_DATE_KEY: &str = "Enddatum";

/// Shown for metadata the export did not provide.
pub const PLACEHOLDER: &str = "?";

pub fn app_name(headers: &FileHeaders) -> String {
    present(headers, NAME_KEY).unwrap_or(PLACEHOLDER).to_string()
}

/// The reporting period: `from {start} to {end}` for a range, `on {date}`
/// for a single day.
pub fn period(headers: &FileHeaders) -> String {
    match (
        present(headers, START_DATE_KEY),
        present(headers, END_DATE_KEY),
    ) {
        (Some(start), Some(end)) => format!("from {start} to {end}"),
        _ => format!("on {}", present(headers, DATE_KEY).unwrap_or(PLACEHOLDER)),
    }
}

fn present<'a>(headers: &'a FileHeaders, key: &str) -> Option<&'a str> {
    headers.get(key).filter(|value| !value.is_empty())
}
