//! Data types produced by the report builder.

use serde::Serialize;

/// One release line of a date section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRow {
    pub release: String,
    pub total: i64,
    pub percentage: f64,
}

/// All releases seen on a single date, sorted newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSection {
    pub date: String,
    pub total: i64,
    pub releases: Vec<ReleaseRow>,
}

/// The complete report, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub app_name: String,
    pub period: String,
    pub sections: Vec<DateSection>,
}

impl Report {
    /// The one-line description under the title.
    pub fn description(&self) -> String {
        format!("Report for {} {}.", self.app_name, self.period)
    }
}
