//! Detected-by-Period Report
//!
//! Cases per age group for each week or month of the report years, one
//! zone at a time. Periods without any cases are left out.

use crate::display::ReportTable;
use crate::error::{CovidError, CovidResult};
use crate::models::{Period, PeriodKind};
use crate::storage::{CaseFilter, Store};

/// Counts for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRow {
    pub period: Period,
    /// One count per age group, in the report's age group order
    pub counts: Vec<u64>,
    pub total: u64,
}

/// Non-empty periods of one zone for one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPeriods {
    pub year: i32,
    pub rows: Vec<PeriodRow>,
}

impl YearPeriods {
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePeriods {
    pub zone: String,
    pub years: Vec<YearPeriods>,
}

/// Detected-by-period report
#[derive(Debug, Clone)]
pub struct DetectedReport {
    pub kind: PeriodKind,
    pub age_groups: Vec<String>,
    pub zones: Vec<ZonePeriods>,
}

impl DetectedReport {
    /// Count cases per zone, year, period and age group.
    ///
    /// Fails with `MissingZone` when no zone is selected.
    pub fn generate(
        store: &Store,
        kind: PeriodKind,
        zones: &[String],
        years: &[i32],
    ) -> CovidResult<Self> {
        if zones.is_empty() {
            return Err(CovidError::MissingZone);
        }

        let age_groups = store.distinct_age_groups()?;
        let mut report_zones = Vec::with_capacity(zones.len());

        for zone in zones {
            let mut zone_years = Vec::with_capacity(years.len());
            for &year in years {
                let mut rows = Vec::new();
                for period in kind.periods(year) {
                    let row = count_period(store, zone, &period, &age_groups)?;
                    if row.total > 0 {
                        rows.push(row);
                    }
                }
                zone_years.push(YearPeriods { year, rows });
            }
            tracing::debug!(zone = %zone, ?kind, "counted detected periods");
            report_zones.push(ZonePeriods {
                zone: zone.clone(),
                years: zone_years,
            });
        }

        Ok(Self {
            kind,
            age_groups,
            zones: report_zones,
        })
    }

    /// Period label, one column per age group, then "Total"
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(self.kind.column_label().to_string())
            .chain(self.age_groups.iter().cloned())
            .chain(std::iter::once("Total".to_string()))
            .collect()
    }

    fn year_table(&self, year: &YearPeriods) -> ReportTable {
        let mut table = ReportTable::new(self.headers());
        for row in &year.rows {
            table.push_row(
                std::iter::once(row.period.label())
                    .chain(row.counts.iter().map(|c| c.to_string()))
                    .chain(std::iter::once(row.total.to_string())),
            );
        }
        table
    }

    /// One table per zone and year
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        for zone in &self.zones {
            output.push_str(&format!("Detected cases for zone: {}\n", zone.zone));
            for year in &zone.years {
                output.push_str(&format!("{}:\n", year.year));
                output.push_str(&self.year_table(year).render());
                output.push_str("\n\n");
            }
        }
        output
    }

    /// One header per zone, followed by the rows of every year
    pub fn export_csv(&self) -> CovidResult<String> {
        let mut output = String::new();
        for zone in &self.zones {
            output.push_str(&ReportTable::new(self.headers()).to_csv()?);
            for year in &zone.years {
                output.push_str(&self.year_table(year).rows_to_csv()?);
            }
        }
        Ok(output)
    }
}

fn count_period(
    store: &Store,
    zone: &str,
    period: &Period,
    age_groups: &[String],
) -> CovidResult<PeriodRow> {
    let mut base = CaseFilter::new()
        .with_zone(zone)
        .with_reported(period.date_prefix());
    if let Some(week) = period.week_number() {
        base = base.with_week(week);
    }

    let counts = age_groups
        .iter()
        .map(|age| store.count(&base.clone().with_age_group(age.as_str())))
        .collect::<CovidResult<Vec<_>>>()?;
    let total = counts.iter().sum();

    Ok(PeriodRow {
        period: *period,
        counts,
        total,
    })
}
