//! Spreadsheet sync
//!
//! Imports can push per-year pivot sheets to a spreadsheet. The sink is a
//! trait so the import pipeline does not care where sheets end up;
//! `WorkbookDir` keeps each sheet as a CSV file in a directory with a JSON
//! manifest describing the sheets.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CovidError, CovidResult};

/// One rectangular write to a named sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetUpdate {
    /// Sheet name, e.g. `PIVOT-2021`
    pub sheet: String,
    /// Rows to write, header first
    pub rows: Vec<Vec<String>>,
    /// Top-left cell in A1 notation
    pub start_cell: String,
    /// Replace the sheet contents instead of appending
    pub replace: bool,
    /// Number of leading rows to freeze
    pub freeze_rows: usize,
}

impl SheetUpdate {
    /// Replace a whole sheet starting at A1 with a frozen header row
    pub fn replace_with_header(sheet: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet: sheet.into(),
            rows,
            start_cell: "A1".to_string(),
            replace: true,
            freeze_rows: 1,
        }
    }
}

/// A spreadsheet that accepts sheet updates
pub trait SheetSync {
    /// Human readable name of the target, for status output
    fn name(&self) -> String;

    fn update_sheet(&mut self, update: &SheetUpdate) -> CovidResult<()>;
}

/// Per-sheet metadata kept in `workbook.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetMeta {
    pub start_cell: String,
    pub frozen_rows: usize,
    pub rows: usize,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Manifest {
    sheets: BTreeMap<String, SheetMeta>,
}

/// A workbook stored as a directory of CSV sheets
#[derive(Debug, Clone)]
pub struct WorkbookDir {
    root: PathBuf,
}

impl WorkbookDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the CSV file backing `sheet`
    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.root.join(format!("{}.csv", sheet))
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join("workbook.json")
    }

    /// Metadata for every sheet written so far
    pub fn sheets(&self) -> CovidResult<BTreeMap<String, SheetMeta>> {
        Ok(self.load_manifest()?.sheets)
    }

    fn load_manifest(&self) -> CovidResult<Manifest> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(Manifest::default());
        }
        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents)
            .map_err(|e| CovidError::Sync(format!("Failed to parse {}: {}", path.display(), e)))
    }

    fn save_manifest(&self, manifest: &Manifest) -> CovidResult<()> {
        let contents = serde_json::to_string_pretty(manifest)
            .map_err(|e| CovidError::Sync(format!("Failed to serialize manifest: {}", e)))?;
        fs::write(self.manifest_path(), contents)?;
        Ok(())
    }
}

impl SheetSync for WorkbookDir {
    fn name(&self) -> String {
        self.root.display().to_string()
    }

    fn update_sheet(&mut self, update: &SheetUpdate) -> CovidResult<()> {
        let (col, row) = parse_cell(&update.start_cell)?;
        fs::create_dir_all(&self.root)?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(!update.replace)
            .truncate(update.replace)
            .open(self.sheet_path(&update.sheet))?;
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

        if update.replace {
            for _ in 0..row {
                writer.write_record([""])?;
            }
        }
        for data in &update.rows {
            let padded = std::iter::repeat("")
                .take(col)
                .chain(data.iter().map(String::as_str));
            writer.write_record(padded)?;
        }
        writer.flush()?;

        let mut manifest = self.load_manifest()?;
        let previous_rows = manifest
            .sheets
            .get(&update.sheet)
            .filter(|_| !update.replace)
            .map(|meta| meta.rows)
            .unwrap_or(0);
        manifest.sheets.insert(
            update.sheet.clone(),
            SheetMeta {
                start_cell: update.start_cell.clone(),
                frozen_rows: update.freeze_rows,
                rows: previous_rows + update.rows.len(),
                updated_at: Utc::now(),
            },
        );
        self.save_manifest(&manifest)?;

        tracing::debug!(sheet = %update.sheet, rows = update.rows.len(), "updated sheet");
        Ok(())
    }
}

/// Parse an A1-style cell into zero-based (column, row)
fn parse_cell(cell: &str) -> CovidResult<(usize, usize)> {
    let invalid = || CovidError::Sync(format!("Invalid start cell: {}", cell));

    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = cell.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    let col = letters
        .chars()
        .try_fold(0usize, |acc, c| {
            acc.checked_mul(26)?
                .checked_add(c.to_ascii_uppercase() as usize - 'A' as usize + 1)
        })
        .ok_or_else(invalid)?;
    let row: usize = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok((col - 1, row - 1))
}
