//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod import;
pub mod report;
pub mod zones;

pub use import::handle_import_command;
pub use report::{handle_report_command, render_reports, ReportSelection};
pub use zones::{handle_list_zones, resolve_zones};
