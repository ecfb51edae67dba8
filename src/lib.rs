//! covid-stats - Alberta COVID-19 case statistics
//!
//! This library imports the regional COVID-19 case export into a local
//! SQLite database and produces aggregate reports from it: case totals by
//! status, counts by age group and zone, and counts by week or month of
//! detection.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and JSON settings
//! - `error`: Custom error types
//! - `models`: Case records, statuses, and report periods
//! - `storage`: SQLite case store and typed count filters
//! - `services`: Zone resolution and CSV import
//! - `reports`: Status, age, and detected-by-period reports
//! - `display`: Table and CSV rendering
//! - `export`: Pivot sheet sync
//! - `cli`: Handlers behind the command-line flags
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_stats::reports::StatusSummaryReport;
//! use covid_stats::storage::Store;
//!
//! let store = Store::open(&path)?;
//! let report = StatusSummaryReport::generate(&store, &[], 4_428_112)?;
//! println!("{}", report.format_terminal());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{CovidError, CovidResult};
