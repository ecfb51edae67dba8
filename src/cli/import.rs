//! CLI command handler for CSV import
//!
//! Replaces the stored dataset with a case export and, when a workbook is
//! configured, refreshes the per-year pivot sheets.

use std::path::Path;

use crate::config::Settings;
use crate::error::CovidResult;
use crate::export::WorkbookDir;
use crate::services::{sync_pivots, ImportService};
use crate::storage::Store;

/// Handle the `--import` flag
pub fn handle_import_command(store: &mut Store, settings: &Settings, file: &Path) -> CovidResult<()> {
    let (result, records) = ImportService::new(store).import_file(file)?;
    println!("Imported {} lines.", result.imported);

    if let Some(book) = &settings.sheet_book {
        let mut workbook = WorkbookDir::new(book);
        sync_pivots(&mut workbook, &records, &settings.report_years)?;
        println!("Updated spreadsheet: {}", book.display());
    }

    Ok(())
}
