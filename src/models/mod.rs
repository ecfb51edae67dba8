//! Core data models for covid-stats
//!
//! Case records as imported from the regional export, and the periods the
//! detected-by-period reports bucket them into.

pub mod case;
pub mod period;

pub use case::{CaseRecord, CaseStatus, DATE_FORMAT};
pub use period::{DatePrefix, Period, PeriodKind};
