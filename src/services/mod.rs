//! Service layer for covid-stats
//!
//! Zone resolution and CSV import on top of the storage layer.

pub mod import;
pub mod zone;

pub use import::{parse_export, pivot_sheets, sync_pivots, ExportLayout, ImportResult, ImportService};
pub use zone::{normalize_zone, ZoneService};
