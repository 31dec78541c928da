//! Report output: markdown to a writer, plus diagnostic logging.

use anyhow::Result;
use std::io::Write;
use tracing::debug;

use crate::report::Report;

/// Logs the report as pretty-printed JSON.
pub fn log_summary(report: &Report) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes rendered markdown to `target` and flushes it.
pub fn write_report<W: Write>(mut target: W, markdown: &str) -> Result<()> {
    target.write_all(markdown.as_bytes())?;
    target.flush()?;
    Ok(())
}
