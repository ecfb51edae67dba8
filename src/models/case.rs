//! Case record model
//!
//! One row of the regional case export, plus the ISO week derived from the
//! reported date at import time.

use chrono::{Datelike, NaiveDate};

/// Date format used by the export and by the `Reported` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome category of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseStatus {
    Recovered,
    Active,
    Died,
}

impl CaseStatus {
    /// Every status, in report order
    pub const ALL: [CaseStatus; 3] = [Self::Recovered, Self::Active, Self::Died];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recovered => "Recovered",
            Self::Active => "Active",
            Self::Died => "Died",
        }
    }
}

/// A single reported case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    /// Sequence number, 1-based in file order unless the export supplied one
    pub num: i64,
    /// Date the case was reported
    pub reported: NaiveDate,
    /// ISO week of `reported`
    pub week_number: u32,
    pub zone: String,
    pub gender: String,
    pub age_group: String,
    /// Raw status text; normally one of the `CaseStatus` values
    pub status: String,
    pub case_type: String,
}

impl CaseRecord {
    /// Create a record, deriving the ISO week from the reported date
    pub fn new(
        num: i64,
        reported: NaiveDate,
        zone: impl Into<String>,
        gender: impl Into<String>,
        age_group: impl Into<String>,
        status: impl Into<String>,
        case_type: impl Into<String>,
    ) -> Self {
        Self {
            num,
            reported,
            week_number: reported.iso_week().week(),
            zone: zone.into(),
            gender: gender.into(),
            age_group: age_group.into(),
            status: status.into(),
            case_type: case_type.into(),
        }
    }

    /// ISO week-year of the reported date, which differs from the calendar
    /// year for the first and last few days of some years
    pub fn iso_year(&self) -> i32 {
        self.reported.iso_week().year()
    }

    /// Reported date as stored in the database
    pub fn reported_text(&self) -> String {
        self.reported.format(DATE_FORMAT).to_string()
    }

    /// The source columns, without the derived week number
    pub fn source_fields(&self) -> Vec<String> {
        vec![
            self.num.to_string(),
            self.reported_text(),
            self.zone.clone(),
            self.gender.clone(),
            self.age_group.clone(),
            self.status.clone(),
            self.case_type.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_number_derived() {
        let record = CaseRecord::new(1, date(2021, 1, 4), "Edmonton Zone", "F", "20-29", "Active", "Confirmed");
        assert_eq!(record.week_number, 1);
        assert_eq!(record.iso_year(), 2021);

        let record = CaseRecord::new(2, date(2021, 1, 11), "Edmonton Zone", "F", "20-29", "Died", "Confirmed");
        assert_eq!(record.week_number, 2);
    }

    #[test]
    fn test_iso_year_differs_at_year_boundary() {
        // 2021-01-01 is a Friday and belongs to 2020-W53
        let record = CaseRecord::new(1, date(2021, 1, 1), "Calgary Zone", "M", "30-39", "Active", "Confirmed");
        assert_eq!(record.week_number, 53);
        assert_eq!(record.iso_year(), 2020);
    }

    #[test]
    fn test_source_fields() {
        let record = CaseRecord::new(7, date(2020, 3, 5), "Calgary Zone", "M", "30-39", "Recovered", "Confirmed");
        assert_eq!(
            record.source_fields(),
            vec!["7", "2020-03-05", "Calgary Zone", "M", "30-39", "Recovered", "Confirmed"]
        );
    }

    #[test]
    fn test_status_order() {
        let names: Vec<_> = CaseStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Recovered", "Active", "Died"]);
    }
}
