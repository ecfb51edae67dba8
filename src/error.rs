//! Custom error types for covid-stats
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for covid-stats operations
#[derive(Error, Debug)]
pub enum CovidError {
    /// The import file has an unsupported number of columns
    #[error("Unexpected number of columns; expected {expected} got {actual}!")]
    Schema { expected: String, actual: usize },

    /// A `--zone` value that is not present in the store
    #[error("Zone \"{zone}\" is not a valid zone, use --list-zones for a list!")]
    UnknownZone { zone: String, valid: Vec<String> },

    /// A detected-by-period report was requested without a zone
    #[error("Use --zone to isolate to a particular zone")]
    MissingZone,

    /// The import path does not exist
    #[error("{} is not a file to import!", .0.display())]
    MissingFile(PathBuf),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// A row whose date column is not `YYYY-MM-DD`
    #[error("Invalid date on line {line}: '{value}'")]
    Date { line: usize, value: String },

    /// Spreadsheet sync errors
    #[error("Spreadsheet sync error: {0}")]
    Sync(String),
}

impl CovidError {
    /// Create a schema error for an import header
    pub fn schema(expected: impl Into<String>, actual: usize) -> Self {
        Self::Schema {
            expected: expected.into(),
            actual,
        }
    }

    /// Zones that would have been accepted, if this is an unknown zone error
    pub fn valid_zones(&self) -> Option<&[String]> {
        match self {
            Self::UnknownZone { valid, .. } => Some(valid),
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CovidError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for CovidError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<csv::Error> for CovidError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for CovidError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for covid-stats operations
pub type CovidResult<T> = Result<T, CovidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CovidError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_schema_error() {
        let err = CovidError::schema("6 or 7", 5);
        assert_eq!(
            err.to_string(),
            "Unexpected number of columns; expected 6 or 7 got 5!"
        );
    }

    #[test]
    fn test_unknown_zone_error() {
        let err = CovidError::UnknownZone {
            zone: "Atlantis Zone".into(),
            valid: vec!["Calgary Zone".into(), "Edmonton Zone".into()],
        };
        assert_eq!(
            err.to_string(),
            "Zone \"Atlantis Zone\" is not a valid zone, use --list-zones for a list!"
        );
        assert_eq!(err.valid_zones().map(|v| v.len()), Some(2));
        assert_eq!(CovidError::MissingZone.valid_zones(), None);
    }

    #[test]
    fn test_missing_file_error() {
        let err = CovidError::MissingFile(PathBuf::from("cases.csv"));
        assert_eq!(err.to_string(), "cases.csv is not a file to import!");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CovidError = io_err.into();
        assert!(matches!(err, CovidError::Io(_)));
    }
}
