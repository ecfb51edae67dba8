//! Storage layer for covid-stats
//!
//! A single SQLite table holding the most recently imported case export.
//! Imports replace the table wholesale; everything else is a count query.

pub mod filter;

pub use filter::CaseFilter;

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{params, Connection, ToSql};

use crate::error::{CovidError, CovidResult};
use crate::models::CaseRecord;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS covid (
    Num INTEGER,
    Reported TEXT,
    WeekNum INTEGER,
    Zone TEXT,
    Gender TEXT,
    AgeGroup TEXT,
    Status TEXT,
    Type TEXT
)";

/// Case store backed by SQLite
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> CovidResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!(path = %path.display(), "opening case store");
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> CovidResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> CovidResult<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    /// Drop the current dataset and insert `records` in its place.
    ///
    /// Runs in one transaction: on error the previous dataset is kept.
    pub fn replace_all(&mut self, records: &[CaseRecord]) -> CovidResult<usize> {
        if let Some(bad) = records
            .iter()
            .find(|r| r.week_number == 0 || r.week_number > 53)
        {
            return Err(CovidError::schema(
                format!("WeekNum 1-53 for case {}", bad.num),
                bad.week_number as usize,
            ));
        }

        let tx = self.conn.transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS covid;")?;
        tx.execute_batch(CREATE_TABLE)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO covid (Num, Reported, WeekNum, Zone, Gender, AgeGroup, Status, Type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.num,
                    record.reported_text(),
                    record.week_number,
                    record.zone,
                    record.gender,
                    record.age_group,
                    record.status,
                    record.case_type,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(rows = records.len(), "replaced case table");
        Ok(records.len())
    }

    /// Every zone present in the store
    pub fn distinct_zones(&self) -> CovidResult<BTreeSet<String>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT Zone FROM covid")?;
        let zones = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(zones)
    }

    /// Every age group present in the store, ascending
    pub fn distinct_age_groups(&self) -> CovidResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT AgeGroup FROM covid")?;
        let mut ages = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ages.sort();
        Ok(ages)
    }

    /// Count records matching `filter`
    pub fn count(&self, filter: &CaseFilter) -> CovidResult<u64> {
        let (sql, params_vec) = filter.to_count_sql();
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let count: i64 = stmt.query_row(params_refs.as_slice(), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Total number of records
    pub fn len(&self) -> CovidResult<u64> {
        self.count(&CaseFilter::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseStatus, DatePrefix, DATE_FORMAT};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(num: i64, date: &str, zone: &str, age: &str, status: &str) -> CaseRecord {
        let reported = NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap();
        CaseRecord::new(num, reported, zone, "F", age, status, "Confirmed")
    }

    fn sample() -> Vec<CaseRecord> {
        vec![
            record(1, "2021-01-04", "Edmonton Zone", "20-29", "Active"),
            record(2, "2021-01-05", "Calgary Zone", "30-39", "Recovered"),
            record(3, "2021-01-11", "Edmonton Zone", "20-29", "Died"),
            record(4, "2020-12-30", "Edmonton Zone", "80+", "Recovered"),
        ]
    }

    #[test]
    fn test_empty_store_is_queryable() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.len().unwrap(), 0);
        assert!(store.distinct_zones().unwrap().is_empty());
        assert!(store.distinct_age_groups().unwrap().is_empty());
        assert_eq!(
            store.count(&CaseFilter::new().with_status(CaseStatus::Died)).unwrap(),
            0
        );
    }

    #[test]
    fn test_replace_all_replaces() {
        let mut store = Store::open_in_memory().unwrap();
        assert_eq!(store.replace_all(&sample()).unwrap(), 4);
        assert_eq!(store.len().unwrap(), 4);

        let second = vec![record(1, "2021-02-01", "North Zone", "0-9", "Active")];
        store.replace_all(&second).unwrap();
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(
            store.distinct_zones().unwrap().into_iter().collect::<Vec<_>>(),
            vec!["North Zone"]
        );
    }

    #[test]
    fn test_rejected_records_keep_previous_dataset() {
        let mut store = Store::open_in_memory().unwrap();
        store.replace_all(&sample()).unwrap();

        let mut bad = record(1, "2021-02-01", "North Zone", "0-9", "Active");
        bad.week_number = 60;
        let err = store.replace_all(&[bad]).unwrap_err();

        assert!(matches!(err, CovidError::Schema { .. }));
        assert_eq!(store.len().unwrap(), 4);
    }

    #[test]
    fn test_distinct_age_groups_sorted() {
        let mut store = Store::open_in_memory().unwrap();
        store.replace_all(&sample()).unwrap();
        assert_eq!(
            store.distinct_age_groups().unwrap(),
            vec!["20-29", "30-39", "80+"]
        );
    }

    #[test]
    fn test_count_filters() {
        let mut store = Store::open_in_memory().unwrap();
        store.replace_all(&sample()).unwrap();

        let edmonton = CaseFilter::new().with_zone("Edmonton Zone");
        assert_eq!(store.count(&edmonton).unwrap(), 3);
        assert_eq!(
            store
                .count(&edmonton.clone().with_age_group("20-29"))
                .unwrap(),
            2
        );
        assert_eq!(
            store
                .count(&edmonton.clone().with_reported(DatePrefix::Year(2021)))
                .unwrap(),
            2
        );
        assert_eq!(
            store
                .count(&CaseFilter::new().with_reported(DatePrefix::Month(2020, 12)))
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .count(&edmonton.with_week(2).with_reported(DatePrefix::Year(2021)))
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_status_counts_sum_to_total() {
        let mut store = Store::open_in_memory().unwrap();
        store.replace_all(&sample()).unwrap();

        for zone in store.distinct_zones().unwrap() {
            let base = CaseFilter::new().with_zone(zone);
            let by_status: u64 = CaseStatus::ALL
                .iter()
                .map(|s| store.count(&base.clone().with_status(*s)).unwrap())
                .sum();
            assert_eq!(by_status, store.count(&base).unwrap());
        }
    }

    #[test]
    fn test_dataset_persists_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("cases.db");

        {
            let mut store = Store::open(&path).unwrap();
            store.replace_all(&sample()).unwrap();
        }

        let store = Store::open(&path).unwrap();
        assert_eq!(store.len().unwrap(), 4);
        assert_eq!(
            store.count(&CaseFilter::new().with_week(53)).unwrap(),
            1
        );
    }
}
