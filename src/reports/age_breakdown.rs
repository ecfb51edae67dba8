//! Case Age Report
//!
//! Case counts per age group, split by status, for all zones combined or
//! for each selected zone side by side.

use crate::display::{format_count, ReportTable};
use crate::error::CovidResult;
use crate::models::CaseStatus;
use crate::services::zone::zone_prefix;
use crate::storage::Store;

use super::tally::{Scope, Tally, TallyKey};

/// Column order within each zone group
const COLUMN_ORDER: [&str; 4] = ["Total", "Recovered", "Active", "Died"];

/// Age breakdown report
#[derive(Debug, Clone)]
pub struct AgeBreakdownReport {
    /// Selected zones; empty means all zones combined
    pub zones: Vec<String>,
    /// Age groups present in the store, ascending
    pub age_groups: Vec<String>,
    tally: Tally,
}

impl AgeBreakdownReport {
    pub fn generate(store: &Store, zones: &[String]) -> CovidResult<Self> {
        let mut report = Self {
            zones: zones.to_vec(),
            age_groups: store.distinct_age_groups()?,
            tally: Tally::new(),
        };

        for zone in report.scopes() {
            for age in &report.age_groups {
                for status in CaseStatus::ALL {
                    report.tally.load(
                        store,
                        TallyKey::new(status, zone.clone(), Scope::only(age.as_str())),
                    )?;
                }
            }
        }

        Ok(report)
    }

    /// Zone scopes in column order
    pub fn scopes(&self) -> Vec<Scope> {
        if self.zones.is_empty() {
            vec![Scope::All]
        } else {
            self.zones.iter().map(Scope::only).collect()
        }
    }

    pub fn count(&self, status: CaseStatus, zone: &Scope, age_group: &str) -> u64 {
        self.tally.get(status, zone, &Scope::only(age_group))
    }

    pub fn total(&self, zone: &Scope, age_group: &str) -> u64 {
        self.tally.total(zone, &Scope::only(age_group))
    }

    /// "Case Age" then either the four status columns, or
    /// `{zone}-{status}` for every zone when more than one is selected
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Case Age".to_string()];
        if self.zones.len() > 1 {
            for zone in &self.zones {
                let prefix = zone_prefix(zone);
                headers.extend(COLUMN_ORDER.iter().map(|s| format!("{}-{}", prefix, s)));
            }
        } else {
            headers.extend(COLUMN_ORDER.iter().map(|s| s.to_string()));
        }
        headers
    }

    /// Build the table; `pretty` adds thousands separators
    pub fn to_table(&self, pretty: bool) -> ReportTable {
        let fmt = |n: u64| if pretty { format_count(n) } else { n.to_string() };
        let scopes = self.scopes();

        let mut table = ReportTable::new(self.headers());
        for age in &self.age_groups {
            let mut row = vec![age.clone()];
            for zone in &scopes {
                row.push(fmt(self.total(zone, age)));
                row.extend(CaseStatus::ALL.iter().map(|s| fmt(self.count(*s, zone, age))));
            }
            table.push_row(row);
        }
        table
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        self.to_table(true).render()
    }

    /// Export the report to CSV format
    pub fn export_csv(&self) -> CovidResult<String> {
        self.to_table(false).to_csv()
    }
}
