//! Display formatting for terminal output
//!
//! Provides the shared table type used by every report, plus number
//! formatting helpers.

pub mod report;

pub use report::{format_count, format_percentage, percent_of, ReportTable};
