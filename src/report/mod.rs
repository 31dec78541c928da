//! Report building and rendering.
//!
//! This module turns a finished aggregation table into a [`types::Report`],
//! orders releases per date, computes percentage shares and renders the
//! result as a markdown document.

pub mod builder;
pub mod format;
pub mod markdown;
pub mod ordering;
pub mod title;
pub mod types;

pub use builder::build;
pub use format::NumberFormat;
pub use types::{DateSection, ReleaseRow, Report};
