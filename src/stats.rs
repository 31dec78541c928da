use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::ReportError;
use crate::header::ColumnHeaders;
use crate::parser::Row;

/// Only columns whose major version starts with this prefix are counted.
pub const PLATFORM_PREFIX: &str = "iOS";

/// Per-date, per-major-version device counts.
///
/// Every stored total is strictly positive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AggregationTable {
    dates: BTreeMap<String, HashMap<String, i64>>,
}

impl AggregationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty entry for `date` unless one exists.
    pub fn ensure_date(&mut self, date: &str) {
        self.dates.entry(date.to_string()).or_default();
    }

    /// Adds `count` to the running total of `(date, version)`.
    ///
    /// The new total is only stored when it is positive; otherwise the entry
    /// keeps whatever value it had before. Returns the stored total.
    pub fn add(&mut self, date: &str, version: &str, count: i64) -> Option<i64> {
        let versions = self.dates.entry(date.to_string()).or_default();
        let total = versions.get(version).copied().unwrap_or(0).saturating_add(count);
        if total > 0 {
            versions.insert(version.to_string(), total);
            Some(total)
        } else {
            None
        }
    }

    /// Dates in ascending string order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.dates.keys().map(String::as_str)
    }

    /// `(version, total)` pairs for `date`, in no particular order.
    pub fn versions(&self, date: &str) -> impl Iterator<Item = (&str, i64)> {
        self.dates
            .get(date)
            .into_iter()
            .flat_map(|versions| versions.iter().map(|(v, t)| (v.as_str(), *t)))
    }

    pub fn total(&self, date: &str, version: &str) -> Option<i64> {
        self.dates.get(date)?.get(version).copied()
    }

    /// Sum of all version totals for `date`.
    pub fn date_total(&self, date: &str) -> i64 {
        self.versions(date).map(|(_, t)| t).sum()
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Extracts the major version tag of a column header: `"iOS 17.2"` -> `"iOS 17"`.
pub fn major_version(header: &str) -> &str {
    header.split('.').next().unwrap_or(header)
}

/// Parses a cell as a device count. `"-"` means zero; anything else must be a
/// finite number and is truncated toward zero.
pub fn parse_count(value: &str) -> Option<i64> {
    if value == "-" {
        return Some(0);
    }
    let number: f64 = value.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    Some(number.trunc() as i64)
}

/// Folds data rows into an [`AggregationTable`].
#[derive(Debug, Default)]
pub struct Aggregator {
    table: AggregationTable,
    rows: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates one data row.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvariantViolation`] if there are no column headers, no
    /// date field, or a cell has no matching header.
    /// [`ReportError::ValueParsing`] if a counted cell is not a number.
    pub fn consume_row(
        &mut self,
        row: &Row,
        columns: Option<&ColumnHeaders>,
    ) -> Result<(), ReportError> {
        let columns = columns.ok_or_else(|| {
            ReportError::InvariantViolation(format!(
                "data row on line {} before any column headers",
                row.line
            ))
        })?;
        let date = row.get(0).ok_or_else(|| {
            ReportError::InvariantViolation(format!("data row on line {} has no date", row.line))
        })?;

        self.table.ensure_date(date);

        for (index, value) in row.fields.iter().enumerate().skip(1) {
            let header = columns.get(index).ok_or_else(|| {
                ReportError::InvariantViolation(format!(
                    "line {}: no column header for column {}",
                    row.line,
                    index + 1
                ))
            })?;

            let version = major_version(header);
            if !version.starts_with(PLATFORM_PREFIX) {
                continue;
            }

            let count = parse_count(value).ok_or_else(|| ReportError::ValueParsing {
                line: row.line,
                column: header.to_string(),
                value: value.to_string(),
            })?;

            if self.table.add(date, version, count).is_none() {
                debug!(line = row.line, date, version, count, "Dropped non-positive total");
            }
        }

        self.rows += 1;
        Ok(())
    }

    /// Number of data rows consumed so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> AggregationTable {
        self.table
    }
}
