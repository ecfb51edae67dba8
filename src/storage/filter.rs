//! Typed count filter for the case table
//!
//! Each `Some` field adds one bound `AND` clause; `None` leaves that
//! dimension unconstrained.

use rusqlite::ToSql;

use crate::models::{CaseStatus, DatePrefix};

/// Filter for [`Store::count`](super::Store::count)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    pub zone: Option<String>,
    pub age_group: Option<String>,
    pub week_number: Option<u32>,
    pub reported: Option<DatePrefix>,
}

impl CaseFilter {
    /// A filter matching every record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_age_group(mut self, age_group: impl Into<String>) -> Self {
        self.age_group = Some(age_group.into());
        self
    }

    pub fn with_week(mut self, week: u32) -> Self {
        self.week_number = Some(week);
        self
    }

    pub fn with_reported(mut self, prefix: DatePrefix) -> Self {
        self.reported = Some(prefix);
        self
    }

    /// Build the `COUNT` statement and its bound parameters
    pub(crate) fn to_count_sql(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut sql = String::from("SELECT COUNT(Num) FROM covid WHERE 1=1");
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![];

        if let Some(status) = self.status {
            sql.push_str(" AND Status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(ref zone) = self.zone {
            sql.push_str(" AND Zone = ?");
            params_vec.push(Box::new(zone.clone()));
        }

        if let Some(ref age_group) = self.age_group {
            sql.push_str(" AND AgeGroup = ?");
            params_vec.push(Box::new(age_group.clone()));
        }

        if let Some(week) = self.week_number {
            sql.push_str(" AND WeekNum = ?");
            params_vec.push(Box::new(week));
        }

        if let Some(prefix) = self.reported {
            sql.push_str(" AND Reported LIKE ?");
            params_vec.push(Box::new(prefix.like_pattern()));
        }

        (sql, params_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_is_unconstrained() {
        let (sql, params) = CaseFilter::new().to_count_sql();
        assert_eq!(sql, "SELECT COUNT(Num) FROM covid WHERE 1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_clauses_follow_fields() {
        let filter = CaseFilter::new()
            .with_status(CaseStatus::Died)
            .with_zone("Edmonton Zone")
            .with_week(3)
            .with_reported(DatePrefix::Year(2021));
        let (sql, params) = filter.to_count_sql();

        assert_eq!(
            sql,
            "SELECT COUNT(Num) FROM covid WHERE 1=1 AND Status = ? AND Zone = ? AND WeekNum = ? AND Reported LIKE ?"
        );
        assert_eq!(params.len(), 4);
    }
}
