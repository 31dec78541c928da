//! CLI entry point for the platform version report.
//!
//! Reads an App Store Connect platform version export and prints the
//! per-date major version distribution as markdown on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use version_report::{
    output::{log_summary, write_report},
    pipeline::build_report,
    report::{NumberFormat, markdown::render},
};

#[derive(Parser)]
#[command(name = "version_report", version)]
#[command(about = "Summarize platform version distribution from an analytics CSV export", long_about = None)]
struct Cli {
    /// The CSV file exported from App Store Connect analytics
    #[arg(value_name = "INPUT")]
    input: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    let report = build_report(&cli.input)
        .with_context(|| format!("failed to build report from {}", cli.input.display()))?;
    log_summary(&report)?;

    let markdown = render(&report, &NumberFormat::default());
    write_report(std::io::stdout().lock(), &markdown)?;

    info!(sections = report.sections.len(), "Report written");
    Ok(())
}
