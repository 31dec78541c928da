//! Reader -> header extractor -> aggregator -> reporter.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ReportError;
use crate::header::{Classified, FileHeaders, HeaderExtractor};
use crate::parser::RowReader;
use crate::report::{self, NumberFormat, Report};
use crate::stats::{AggregationTable, Aggregator};

/// Everything extracted from one export.
#[derive(Debug)]
pub struct Parsed {
    pub headers: FileHeaders,
    pub table: AggregationTable,
}

/// Reads and aggregates every row from `rows`.
///
/// # Errors
///
/// Stops at the first reading, parsing or invariant error.
pub fn aggregate<R: Read>(rows: RowReader<R>) -> Result<Parsed, ReportError> {
    let mut extractor = HeaderExtractor::new();
    let mut aggregator = Aggregator::new();

    for row in rows {
        let row = row?;
        match extractor.feed(&row) {
            Classified::Data => aggregator.consume_row(&row, extractor.columns())?,
            Classified::TableHeader => {
                info!(
                    metadata_keys = extractor.file_headers().len(),
                    columns = extractor.columns().map_or(0, |c| c.len()),
                    "Preamble parsed"
                );
            }
            other => debug!(line = row.line, ?other, "Non-data row"),
        }
    }

    let data_rows = aggregator.rows();
    let table = aggregator.finish();
    let (headers, _) = extractor.finish();
    info!(data_rows, dates = table.len(), "Aggregation complete");

    Ok(Parsed { headers, table })
}

/// Builds the report for any CSV byte source.
pub fn report_from_reader<R: Read>(source: R) -> Result<Report, ReportError> {
    let parsed = aggregate(RowReader::from_reader(source))?;
    Ok(report::build(&parsed.table, &parsed.headers))
}

/// Reads the export at `path` and builds its report.
#[tracing::instrument(skip(path), fields(input = %path.as_ref().display()))]
pub fn build_report<P: AsRef<Path>>(path: P) -> Result<Report, ReportError> {
    let parsed = aggregate(RowReader::open(path)?)?;
    Ok(report::build(&parsed.table, &parsed.headers))
}

/// Runs the whole pipeline on the file at `path` and returns the markdown.
pub fn run<P: AsRef<Path>>(path: P) -> Result<String, ReportError> {
    run_with_format(path, &NumberFormat::default())
}

/// Like [`run`], with explicit number separators.
pub fn run_with_format<P: AsRef<Path>>(
    path: P,
    format: &NumberFormat,
) -> Result<String, ReportError> {
    let report = build_report(path)?;
    Ok(report::markdown::render(&report, format))
}
