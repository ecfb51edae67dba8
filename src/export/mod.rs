//! Export module for covid-stats
//!
//! Pushes imported data out to spreadsheets.

pub mod sheets;

pub use sheets::{SheetMeta, SheetSync, SheetUpdate, WorkbookDir};
