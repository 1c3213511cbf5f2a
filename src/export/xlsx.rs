//! XLSX workbook output.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::model::NormalizedTable;

/// Write all tables into one workbook, one sheet per table.
///
/// Sheets are named `Table_<index>` after each table's position on the
/// source page, so sheet names line up with the per-table CSV filenames.
pub fn write_workbook(tables: &[NormalizedTable], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.sheet_name())?;

        for (col, name) in table.columns.iter().enumerate() {
            sheet.write_string(0, col as u16, name.as_str())?;
        }
        for (row_ix, row) in table.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                sheet.write_string(row_ix as u32 + 1, col as u16, cell.as_str())?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
