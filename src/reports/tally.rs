//! Status counts keyed by zone and age group
//!
//! Reports query the store once per (status, zone, age group) cell and keep
//! the answers here. Missing cells read as zero.

use std::collections::HashMap;

use crate::error::CovidResult;
use crate::models::CaseStatus;
use crate::storage::{CaseFilter, Store};

/// One dimension of a tally key: everything, or a single value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    All,
    Only(String),
}

impl Scope {
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TallyKey {
    pub status: CaseStatus,
    pub zone: Scope,
    pub age_group: Scope,
}

impl TallyKey {
    pub fn new(status: CaseStatus, zone: Scope, age_group: Scope) -> Self {
        Self {
            status,
            zone,
            age_group,
        }
    }

    /// Store filter selecting exactly the records of this cell
    pub fn filter(&self) -> CaseFilter {
        let mut filter = CaseFilter::new().with_status(self.status);
        if let Some(zone) = self.zone.value() {
            filter = filter.with_zone(zone);
        }
        if let Some(age) = self.age_group.value() {
            filter = filter.with_age_group(age);
        }
        filter
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tally {
    counts: HashMap<TallyKey, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one cell from the store and remember it
    pub fn load(&mut self, store: &Store, key: TallyKey) -> CovidResult<u64> {
        let count = store.count(&key.filter())?;
        self.set(key, count);
        Ok(count)
    }

    /// Record the count for one cell, replacing any earlier value
    pub fn set(&mut self, key: TallyKey, count: u64) {
        self.counts.insert(key, count);
    }

    pub fn get(&self, status: CaseStatus, zone: &Scope, age_group: &Scope) -> u64 {
        self.counts
            .get(&TallyKey::new(status, zone.clone(), age_group.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over every status for one (zone, age group) cell
    pub fn total(&self, zone: &Scope, age_group: &Scope) -> u64 {
        CaseStatus::ALL
            .iter()
            .map(|s| self.get(*s, zone, age_group))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cells_are_zero() {
        let tally = Tally::new();
        assert_eq!(tally.get(CaseStatus::Died, &Scope::All, &Scope::All), 0);
        assert_eq!(tally.total(&Scope::only("North Zone"), &Scope::All), 0);
    }

    #[test]
    fn test_total_sums_statuses() {
        let mut tally = Tally::new();
        let zone = Scope::only("Edmonton Zone");
        tally.set(TallyKey::new(CaseStatus::Recovered, zone.clone(), Scope::All), 5);
        tally.set(TallyKey::new(CaseStatus::Died, zone.clone(), Scope::All), 3);

        assert_eq!(tally.get(CaseStatus::Died, &zone, &Scope::All), 3);
        assert_eq!(tally.total(&zone, &Scope::All), 8);
        assert_eq!(tally.total(&Scope::All, &Scope::All), 0);
    }

    #[test]
    fn test_set_replaces_earlier_count() {
        let mut tally = Tally::new();
        let key = TallyKey::new(CaseStatus::Active, Scope::only("Edmonton Zone"), Scope::All);
        tally.set(key.clone(), 2);
        tally.set(key, 2);

        assert_eq!(tally.get(CaseStatus::Active, &Scope::only("Edmonton Zone"), &Scope::All), 2);
    }

    #[test]
    fn test_key_filter() {
        let key = TallyKey::new(CaseStatus::Active, Scope::All, Scope::only("20-29"));
        let filter = key.filter();
        assert_eq!(filter.status, Some(CaseStatus::Active));
        assert_eq!(filter.zone, None);
        assert_eq!(filter.age_group.as_deref(), Some("20-29"));
    }
}
