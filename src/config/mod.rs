//! Configuration module for covid-stats
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - JSON settings (population, report years, workbook)

pub mod paths;
pub mod settings;

pub use paths::CovidPaths;
pub use settings::Settings;
