//! Report formatting utilities for terminal output
//!
//! Every report builds a [`ReportTable`] and then renders it either as a
//! right-aligned ASCII table or as CSV text.

use tabled::builder::Builder;
use tabled::settings::object::Segment;
use tabled::settings::{Alignment, Style};

use crate::error::{CovidError, CovidResult};

/// A header row plus data rows, all pre-formatted as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Render as an ASCII table with right-aligned cells
    pub fn render(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().cloned());
        }

        let mut table = builder.build();
        table
            .with(Style::ascii())
            .modify(Segment::all(), Alignment::right());
        table.to_string()
    }

    /// Header line followed by one line per row
    pub fn to_csv(&self) -> CovidResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        csv_into_string(writer)
    }

    /// Data rows only, for reports that share one header across tables
    pub fn rows_to_csv(&self) -> CovidResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row)?;
        }
        csv_into_string(writer)
    }
}

fn csv_into_string(writer: csv::Writer<Vec<u8>>) -> CovidResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CovidError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CovidError::Csv(e.to_string()))
}

/// Format a count with thousands separators: 4428112 becomes "4,428,112"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a percentage with two decimals
pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// `part / whole` as a percentage, 0 when `whole` is 0
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
