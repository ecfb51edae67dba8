//! Path management for covid-stats
//!
//! Provides platform-aware path resolution for the settings file and the
//! case database.
//!
//! ## Path Resolution Order
//!
//! 1. `COVID_STATS_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories`
//!    (e.g. `~/.local/share/covid-stats` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::CovidError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "COVID_STATS_DATA_DIR";

/// File name of the SQLite case database
pub const DATABASE_FILE: &str = "edmonton-covid.db";

/// Manages all paths used by covid-stats
#[derive(Debug, Clone)]
pub struct CovidPaths {
    base_dir: PathBuf,
}

impl CovidPaths {
    /// Create a new CovidPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// environment override is not set.
    pub fn new() -> Result<Self, CovidError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CovidPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the case database
    pub fn database_file(&self) -> PathBuf {
        self.base_dir.join(DATABASE_FILE)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), CovidError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CovidError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, CovidError> {
    ProjectDirs::from("ca", "Edmonton", "covid-stats")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CovidError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CovidPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.database_file(), temp_dir.path().join("edmonton-covid.db"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let paths = CovidPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();

        assert!(nested.exists());
    }
}
