//! Reports module for covid-stats
//!
//! Provides the case status summary, the age breakdown, and the
//! detected-by-week/month reports.

pub mod age_breakdown;
pub mod detected;
pub mod status_summary;
pub mod tally;

pub use age_breakdown::AgeBreakdownReport;
pub use detected::{DetectedReport, PeriodRow, YearPeriods, ZonePeriods};
pub use status_summary::{StatusPercentages, StatusSummaryReport};
pub use tally::{Scope, Tally, TallyKey};
