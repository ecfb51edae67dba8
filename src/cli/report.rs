//! CLI handlers for reports
//!
//! Runs the selected reports in a fixed order and prints them as tables or
//! CSV text.

use crate::config::Settings;
use crate::error::{CovidError, CovidResult};
use crate::models::PeriodKind;
use crate::reports::{AgeBreakdownReport, DetectedReport, StatusSummaryReport};
use crate::storage::Store;

/// Which reports to run, and how to print them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSelection {
    pub case_status: bool,
    pub case_age: bool,
    pub detected_weeks: bool,
    pub detected_months: bool,
    pub csv: bool,
}

impl ReportSelection {
    pub fn any(&self) -> bool {
        self.case_status || self.case_age || self.detected_weeks || self.detected_months
    }

    /// Period reports need at least one `--zone`
    pub fn validate(&self, has_zones: bool) -> CovidResult<()> {
        if (self.detected_weeks || self.detected_months) && !has_zones {
            return Err(CovidError::MissingZone);
        }
        Ok(())
    }

    fn period_kinds(&self) -> Vec<PeriodKind> {
        let mut kinds = Vec::new();
        if self.detected_weeks {
            kinds.push(PeriodKind::Week);
        }
        if self.detected_months {
            kinds.push(PeriodKind::Month);
        }
        kinds
    }
}

/// Build the combined output of every selected report
pub fn render_reports(
    store: &Store,
    settings: &Settings,
    zones: &[String],
    selection: &ReportSelection,
) -> CovidResult<String> {
    selection.validate(!zones.is_empty())?;
    let mut output = String::new();

    if selection.case_status {
        let report = StatusSummaryReport::generate(store, zones, settings.population)?;
        if selection.csv {
            output.push_str(&report.export_csv()?);
        } else {
            output.push_str(&report.format_terminal());
        }
        output.push('\n');
    }

    if selection.case_age {
        let report = AgeBreakdownReport::generate(store, zones)?;
        if selection.csv {
            output.push_str(&report.export_csv()?);
        } else {
            output.push_str(&report.format_terminal());
            output.push('\n');
        }
        output.push('\n');
    }

    for kind in selection.period_kinds() {
        let report = DetectedReport::generate(store, kind, zones, &settings.report_years)?;
        if selection.csv {
            output.push_str(&report.export_csv()?);
        } else {
            output.push_str(&report.format_terminal());
        }
    }

    Ok(output)
}

/// Handle the report flags
pub fn handle_report_command(
    store: &Store,
    settings: &Settings,
    zones: &[String],
    selection: &ReportSelection,
) -> CovidResult<()> {
    if !selection.any() {
        return Ok(());
    }

    let output = render_reports(store, settings, zones, selection)?;
    print!("{}", output);
    Ok(())
}
