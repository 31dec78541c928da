use crate::header::FileHeaders;
use crate::report::format::pct;
use crate::report::ordering::natural_cmp_desc;
use crate::report::title::{app_name, period};
use crate::report::types::{DateSection, ReleaseRow, Report};
use crate::stats::AggregationTable;

pub const REPORT_TITLE: &str = "Major Platform Version Distribution";

/// Assembles a [`Report`] from a finished aggregation.
///
/// Sections follow the table's ascending date order. Releases within a
/// section are sorted newest first by natural order, so `iOS 17` comes before
/// `iOS 9`.
pub fn build(table: &AggregationTable, headers: &FileHeaders) -> Report {
    let sections = table
        .dates()
        .map(|date| build_section(table, date))
        .collect();

    Report {
        title: REPORT_TITLE.to_string(),
        app_name: app_name(headers),
        period: period(headers),
        sections,
    }
}

fn build_section(table: &AggregationTable, date: &str) -> DateSection {
    let total = table.date_total(date);

    let mut releases: Vec<ReleaseRow> = table
        .versions(date)
        .map(|(release, count)| ReleaseRow {
            release: release.to_string(),
            total: count,
            percentage: pct(count, total),
        })
        .collect();
    releases.sort_by(|a, b| natural_cmp_desc(&a.release, &b.release));

    DateSection {
        date: date.to_string(),
        total,
        releases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AggregationTable {
        let mut table = AggregationTable::new();
        table.add("2024-01-02", "iOS 9", 10);
        table.add("2024-01-02", "iOS 17", 60);
        table.add("2024-01-02", "iOS 16", 30);
        table.add("2024-01-01", "iOS 17", 5);
        table
    }

    #[test]
    fn test_sections_in_date_order() {
        let report = build(&table(), &FileHeaders::default());
        let dates: Vec<_> = report.sections.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_releases_newest_first_with_shares() {
        let report = build(&table(), &FileHeaders::default());
        let section = &report.sections[1];
        assert_eq!(section.total, 100);

        let releases: Vec<_> = section
            .releases
            .iter()
            .map(|r| (r.release.as_str(), r.total))
            .collect();
        assert_eq!(releases, vec![("iOS 17", 60), ("iOS 16", 30), ("iOS 9", 10)]);

        let shares: Vec<_> = section.releases.iter().map(|r| r.percentage).collect();
        for (share, expected) in shares.iter().zip([60.0, 30.0, 10.0]) {
            assert!((share - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let mut table = AggregationTable::new();
        for (version, count) in [("iOS 17", 7), ("iOS 16", 11), ("iOS 15", 13), ("iOS 14", 3)] {
            table.add("d", version, count);
        }
        let report = build(&table, &FileHeaders::default());
        let sum: f64 = report.sections[0].releases.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_date_without_releases() {
        let mut table = AggregationTable::new();
        table.ensure_date("2024-01-01");
        let report = build(&table, &FileHeaders::default());
        assert_eq!(report.sections[0].total, 0);
        assert!(report.sections[0].releases.is_empty());
    }

    #[test]
    fn test_title_metadata() {
        let headers: FileHeaders = [("Name", "MyApp"), ("Datum", "2024-01-01")]
            .into_iter()
            .collect();
        let report = build(&AggregationTable::new(), &headers);
        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.description(), "Report for MyApp on 2024-01-01.");
        assert!(report.sections.is_empty());
    }
}
