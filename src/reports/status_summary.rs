//! Case Status Report
//!
//! Case totals per status, for all zones combined and for each zone, plus
//! population-relative percentages.

use crate::display::{format_count, format_percentage, percent_of, ReportTable};
use crate::error::CovidResult;
use crate::models::CaseStatus;
use crate::storage::Store;

use super::tally::{Scope, Tally, TallyKey};

/// Population-relative percentages for the "All" column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusPercentages {
    /// Total cases over population
    pub infected: f64,
    /// Active cases over population
    pub currently_infected: f64,
    /// Deaths over population
    pub died_of_population: f64,
    /// Deaths over total cases
    pub case_fatality: f64,
    /// Recoveries over total cases
    pub recovery: f64,
}

/// Status summary report
#[derive(Debug, Clone)]
pub struct StatusSummaryReport {
    /// Zone columns, in display order
    pub zones: Vec<String>,
    /// Population the percentages are relative to
    pub population: u64,
    tally: Tally,
}

impl StatusSummaryReport {
    /// Count every status for "All" and for each zone.
    ///
    /// An empty `zones` selects every zone in the store.
    pub fn generate(store: &Store, zones: &[String], population: u64) -> CovidResult<Self> {
        let zones: Vec<String> = if zones.is_empty() {
            store.distinct_zones()?.into_iter().collect()
        } else {
            zones.to_vec()
        };

        let mut report = Self {
            zones,
            population,
            tally: Tally::new(),
        };

        for column in report.columns() {
            for status in CaseStatus::ALL {
                report
                    .tally
                    .load(store, TallyKey::new(status, column.clone(), Scope::All))?;
            }
        }

        Ok(report)
    }

    /// "All" followed by one column per zone
    pub fn columns(&self) -> Vec<Scope> {
        std::iter::once(Scope::All)
            .chain(self.zones.iter().map(Scope::only))
            .collect()
    }

    pub fn count(&self, status: CaseStatus, column: &Scope) -> u64 {
        self.tally.get(status, column, &Scope::All)
    }

    pub fn total(&self, column: &Scope) -> u64 {
        self.tally.total(column, &Scope::All)
    }

    pub fn percentages(&self) -> StatusPercentages {
        let total = self.total(&Scope::All);
        let died = self.count(CaseStatus::Died, &Scope::All);

        StatusPercentages {
            infected: percent_of(total, self.population),
            currently_infected: percent_of(self.count(CaseStatus::Active, &Scope::All), self.population),
            died_of_population: percent_of(died, self.population),
            case_fatality: percent_of(died, total),
            recovery: percent_of(self.count(CaseStatus::Recovered, &Scope::All), total),
        }
    }

    /// Build the table; `pretty` adds thousands separators
    pub fn to_table(&self, pretty: bool) -> ReportTable {
        let fmt = |n: u64| if pretty { format_count(n) } else { n.to_string() };
        let columns = self.columns();

        let mut table = ReportTable::new(
            ["Status".to_string(), "All".to_string()]
                .into_iter()
                .chain(self.zones.iter().cloned()),
        );

        for status in CaseStatus::ALL {
            table.push_row(
                std::iter::once(status.as_str().to_string())
                    .chain(columns.iter().map(|c| fmt(self.count(status, c)))),
            );
        }
        table.push_row(
            std::iter::once("Total".to_string())
                .chain(columns.iter().map(|c| fmt(self.total(c)))),
        );

        table
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let pct = self.percentages();
        let mut output = self.to_table(true).render();
        output.push('\n');

        output.push_str(&format!(
            "\nGiven an Alberta population of {}\n",
            format_count(self.population)
        ));
        output.push_str(&format!(
            "  {} of the population was infected\n",
            format_percentage(pct.infected)
        ));
        output.push_str(&format!(
            "  {} of the population is currently infected\n",
            format_percentage(pct.currently_infected)
        ));
        output.push_str(&format!(
            "  {} of the population died\n",
            format_percentage(pct.died_of_population)
        ));
        output.push_str(&format!(
            "  {} of those infected died\n",
            format_percentage(pct.case_fatality)
        ));
        output.push_str(&format!(
            "  {} of those infected have recovered\n",
            format_percentage(pct.recovery)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv(&self) -> CovidResult<String> {
        self.to_table(false).to_csv()
    }
}
