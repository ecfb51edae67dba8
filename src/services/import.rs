//! CSV Import service
//!
//! Reads the regional case export, derives ISO weeks, and replaces the store
//! contents. Optionally partitions the rows into per-year pivot sheets.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::error::{CovidError, CovidResult};
use crate::export::{SheetSync, SheetUpdate};
use crate::models::{CaseRecord, DATE_FORMAT};
use crate::storage::Store;

/// Header of every pivot sheet
pub const PIVOT_HEADER: [&str; 7] = [
    "Num",
    "Date reported",
    "Alberta Health Services Zone",
    "Gender",
    "Age group",
    "Case status",
    "Case type",
];

/// Supported export layouts, told apart by column count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLayout {
    /// `Date, Zone, Gender, AgeGroup, Status, Type`; `Num` assigned on import
    Unnumbered,
    /// `Num, Date, Zone, Gender, AgeGroup, Status, Type`
    Numbered,
}

impl ExportLayout {
    pub fn from_columns(columns: usize) -> Option<Self> {
        match columns {
            6 => Some(Self::Unnumbered),
            7 => Some(Self::Numbered),
            _ => None,
        }
    }
}

/// A fully parsed export, not yet stored
#[derive(Debug, Clone)]
pub struct ParsedExport {
    pub layout: ExportLayout,
    pub records: Vec<CaseRecord>,
}

/// Result of a completed import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    /// Number of rows stored
    pub imported: usize,
    pub layout: ExportLayout,
}

/// Service for CSV import
pub struct ImportService<'a> {
    store: &'a mut Store,
}

impl<'a> ImportService<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Import `path`, replacing the whole dataset.
    ///
    /// Every row is parsed before the store is touched, so a bad file leaves
    /// the previous dataset in place.
    pub fn import_file(&mut self, path: &Path) -> CovidResult<(ImportResult, Vec<CaseRecord>)> {
        if !path.is_file() {
            return Err(CovidError::MissingFile(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), "importing case export");
        let file = std::fs::File::open(path)?;
        let parsed = parse_export(file)?;
        let imported = self.store.replace_all(&parsed.records)?;

        Ok((
            ImportResult {
                imported,
                layout: parsed.layout,
            },
            parsed.records,
        ))
    }
}

/// Parse a case export from any reader
pub fn parse_export<R: Read>(reader: R) -> CovidResult<ParsedExport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let columns = reader.headers()?.len();
    let layout = ExportLayout::from_columns(columns)
        .ok_or_else(|| CovidError::schema("6 or 7", columns))?;
    tracing::debug!(?layout, "detected export layout");

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        records.push(parse_row(&row, layout, idx as i64 + 1, line)?);
    }

    Ok(ParsedExport { layout, records })
}

fn parse_row(
    row: &StringRecord,
    layout: ExportLayout,
    sequence: i64,
    line: usize,
) -> CovidResult<CaseRecord> {
    let (num, offset) = match layout {
        ExportLayout::Unnumbered => (sequence, 0),
        ExportLayout::Numbered => {
            let raw = field_at(row, 0);
            let num = raw.parse::<i64>().map_err(|_| {
                CovidError::Csv(format!("Invalid Num on line {}: '{}'", line, raw))
            })?;
            (num, 1)
        }
    };

    let raw_date = field_at(row, offset);
    let reported = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| CovidError::Date {
        line,
        value: raw_date.to_string(),
    })?;

    Ok(CaseRecord::new(
        num,
        reported,
        field_at(row, offset + 1),
        field_at(row, offset + 2),
        field_at(row, offset + 3),
        field_at(row, offset + 4),
        field_at(row, offset + 5),
    ))
}

fn field_at(row: &StringRecord, i: usize) -> &str {
    row.get(i).unwrap_or("")
}

/// Partition records by ISO week-year into pivot sheet rows, header first.
///
/// Every year in `years` gets a sheet, even when it has no rows.
pub fn pivot_sheets(records: &[CaseRecord], years: &[i32]) -> BTreeMap<i32, Vec<Vec<String>>> {
    let header: Vec<String> = PIVOT_HEADER.iter().map(|h| h.to_string()).collect();

    let mut sheets: BTreeMap<i32, Vec<Vec<String>>> = years
        .iter()
        .map(|year| (*year, vec![header.clone()]))
        .collect();

    for record in records {
        sheets
            .entry(record.iso_year())
            .or_insert_with(|| vec![header.clone()])
            .push(record.source_fields());
    }

    sheets
}

/// Push one `PIVOT-{year}` sheet per year; returns the number of sheets
pub fn sync_pivots(
    sync: &mut dyn SheetSync,
    records: &[CaseRecord],
    years: &[i32],
) -> CovidResult<usize> {
    let sheets = pivot_sheets(records, years);
    for (year, rows) in &sheets {
        let update = SheetUpdate::replace_with_header(format!("PIVOT-{}", year), rows.clone());
        sync.update_sheet(&update)?;
    }
    tracing::info!(sheets = sheets.len(), target = %sync.name(), "synced pivot sheets");
    Ok(sheets.len())
}
