//! Error type shared by every pipeline stage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// All failures are fatal: the report is produced completely or not at all.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot open input file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV input: {0}")]
    MalformedInput(#[from] csv::Error),

    #[error("line {line}: cannot parse {value:?} in column {column:?} as a count")]
    ValueParsing {
        line: u64,
        column: String,
        value: String,
    },

    #[error("internal precondition not met: {0}")]
    InvariantViolation(String),
}
