//! User settings for covid-stats
//!
//! Holds the report parameters (population, report years), an optional
//! database override, and the workbook used for pivot sheet sync.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::paths::CovidPaths;
use crate::error::CovidError;

/// Alberta population, as per https://www.alberta.ca/population-statistics.aspx
pub const DEFAULT_POPULATION: u64 = 4_428_112;

/// User settings for covid-stats
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Database file; defaults to the data directory
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Population used for the status summary percentages
    #[serde(default = "default_population")]
    pub population: u64,

    /// Years covered by detected-by-period reports and pivot sheets
    #[serde(default = "default_report_years")]
    pub report_years: Vec<i32>,

    /// Workbook that receives `PIVOT-{year}` sheets after an import.
    /// Sync is skipped when unset.
    #[serde(default)]
    pub sheet_book: Option<PathBuf>,
}

fn default_population() -> u64 {
    DEFAULT_POPULATION
}

fn default_report_years() -> Vec<i32> {
    vec![2020, 2021]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: None,
            population: default_population(),
            report_years: default_report_years(),
            sheet_book: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, CovidError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| CovidError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| CovidError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Load settings from the `--config` override or the default location
    pub fn load(paths: &CovidPaths, config: Option<&Path>) -> Result<Self, CovidError> {
        match config {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&paths.settings_file()),
        }
    }

    /// Database file to open, honouring the `database` override
    pub fn database_path(&self, paths: &CovidPaths) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| paths.database_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.population, 4_428_112);
        assert_eq!(settings.report_years, vec![2020, 2021]);
        assert!(settings.sheet_book.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Settings::load_from(&temp_dir.path().join("nope.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_load_full_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "database": "/tmp/cases.db",
                "population": 1000,
                "report_years": [2021, 2022],
                "sheet_book": "/tmp/book"
            }"#,
        )
        .unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.database, Some(PathBuf::from("/tmp/cases.db")));
        assert_eq!(loaded.population, 1000);
        assert_eq!(loaded.report_years, vec![2021, 2022]);
        assert_eq!(loaded.sheet_book, Some(PathBuf::from("/tmp/book")));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "population": 100 }"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.population, 100);
        assert_eq!(loaded.report_years, vec![2020, 2021]);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, CovidError::Config(_)));
    }

    #[test]
    fn test_database_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CovidPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::default();
        assert_eq!(settings.database_path(&paths), paths.database_file());

        let custom = Settings {
            database: Some(PathBuf::from("/tmp/other.db")),
            ..Settings::default()
        };
        assert_eq!(custom.database_path(&paths), PathBuf::from("/tmp/other.db"));
    }
}
