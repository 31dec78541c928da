pub mod error;
pub mod header;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use error::ReportError;
