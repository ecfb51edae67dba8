//! Report period representation
//!
//! Detected-by-period reports bucket cases by ISO week or by calendar month.

use chrono::{NaiveDate, Weekday};

/// Highest week number visited by the weekly report
pub const REPORT_WEEKS: u32 = 52;

/// Number of months visited by the monthly report
pub const REPORT_MONTHS: u32 = 12;

/// Granularity of a detected-by-period report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Week,
    Month,
}

impl PeriodKind {
    /// First column header of the report
    pub fn column_label(self) -> &'static str {
        match self {
            Self::Week => "Case Detected Week Of",
            Self::Month => "Case Detected Month Of",
        }
    }

    /// Every period of this kind within `year`, in order
    pub fn periods(self, year: i32) -> Vec<Period> {
        match self {
            Self::Week => (1..=REPORT_WEEKS).map(|w| Period::weekly(year, w)).collect(),
            Self::Month => (1..=REPORT_MONTHS).map(|m| Period::monthly(year, m)).collect(),
        }
    }
}

/// A reported-date prefix filter: a whole year or a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrefix {
    Year(i32),
    Month(i32, u32),
}

impl DatePrefix {
    /// SQL `LIKE` pattern matching `YYYY-MM-DD` dates with this prefix
    pub fn like_pattern(&self) -> String {
        match self {
            Self::Year(year) => format!("{:04}-%", year),
            Self::Month(year, month) => format!("{:04}-{:02}-%", year, month),
        }
    }
}

/// One bucket of a detected-by-period report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// ISO week `week` filtered to reported dates starting with `year`
    Weekly { year: i32, week: u32 },

    /// Calendar month
    Monthly { year: i32, month: u32 },
}

impl Period {
    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly { year, week }
    }

    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly { year, month }
    }

    /// Week number to match against `WeekNum`, for weekly periods
    pub fn week_number(&self) -> Option<u32> {
        match self {
            Self::Weekly { week, .. } => Some(*week),
            Self::Monthly { .. } => None,
        }
    }

    /// Reported-date prefix this period filters on.
    ///
    /// Weekly periods filter on the calendar year, not the ISO week-year, so
    /// late-December dates in week 1 of the next ISO year are not matched
    /// and early-January dates in week 52/53 are.
    pub fn date_prefix(&self) -> DatePrefix {
        match self {
            Self::Weekly { year, .. } => DatePrefix::Year(*year),
            Self::Monthly { year, month } => DatePrefix::Month(*year, *month),
        }
    }

    /// Monday of an ISO week
    pub fn week_start(year: i32, week: u32) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
    }

    /// Row label: the Monday for weeks (`2021-01-04`), `YYYY-MM` for months
    pub fn label(&self) -> String {
        match self {
            Self::Weekly { year, week } => Self::week_start(*year, *week)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| format!("{}-W{:02}", year, week)),
            Self::Monthly { year, month } => format!("{:04}-{:02}", year, month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_label_is_monday() {
        assert_eq!(Period::weekly(2021, 1).label(), "2021-01-04");
        assert_eq!(Period::weekly(2021, 2).label(), "2021-01-11");
        // ISO week 1 of 2020 starts in the previous December
        assert_eq!(Period::weekly(2020, 1).label(), "2019-12-30");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(Period::monthly(2020, 3).label(), "2020-03");
        assert_eq!(Period::monthly(2021, 12).label(), "2021-12");
    }

    #[test]
    fn test_date_prefix_patterns() {
        assert_eq!(Period::weekly(2021, 5).date_prefix().like_pattern(), "2021-%");
        assert_eq!(Period::monthly(2021, 5).date_prefix().like_pattern(), "2021-05-%");
    }

    #[test]
    fn test_periods_per_kind() {
        let weeks = PeriodKind::Week.periods(2021);
        assert_eq!(weeks.len(), 52);
        assert_eq!(weeks[0], Period::weekly(2021, 1));
        assert_eq!(weeks[51], Period::weekly(2021, 52));

        let months = PeriodKind::Month.periods(2021);
        assert_eq!(months.len(), 12);
        assert_eq!(months[11].week_number(), None);
    }
}
