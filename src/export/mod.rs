//! Persisting extracted tables.
//!
//! Two destinations: one CSV file per table, and a combined XLSX workbook
//! with one sheet per table. Destinations fail independently; a workbook
//! error never undoes CSV files already on disk.

mod csv;
mod xlsx;

pub use csv::write_table_csv;
pub use xlsx::write_workbook;

use std::path::PathBuf;

use log::{error, info};

use crate::model::NormalizedTable;

/// Where and what to write.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Base path and filename stem; generated files append to it.
    pub base: PathBuf,

    /// Write the per-table CSV files.
    pub csv: bool,

    /// Write the combined workbook.
    pub workbook: bool,
}

impl ExportOptions {
    /// Export both formats under the given base.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            csv: true,
            workbook: true,
        }
    }

    /// CSV files only.
    pub fn csv_only(mut self) -> Self {
        self.workbook = false;
        self
    }

    /// Workbook only.
    pub fn workbook_only(mut self) -> Self {
        self.csv = false;
        self
    }

    /// Path of the CSV file for the table at `index`.
    pub fn csv_path(&self, index: usize) -> PathBuf {
        let mut name = self.base.as_os_str().to_os_string();
        name.push(format!("_table_{index}.csv"));
        PathBuf::from(name)
    }

    /// Path of the combined workbook.
    pub fn workbook_path(&self) -> PathBuf {
        let mut name = self.base.as_os_str().to_os_string();
        name.push("_all_tables.xlsx");
        PathBuf::from(name)
    }
}

/// What an export run produced.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// CSV files written.
    pub csv_files: Vec<PathBuf>,

    /// Workbook path, when written.
    pub workbook: Option<PathBuf>,

    /// Human-readable per-destination failures.
    pub failures: Vec<String>,
}

impl ExportReport {
    /// Whether every requested destination was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write all tables to the configured destinations.
///
/// Failures are collected per destination rather than propagated, so one
/// bad path cannot take down the rest of the run. An empty table slice
/// writes nothing.
pub fn write_all(tables: &[NormalizedTable], options: &ExportOptions) -> ExportReport {
    let mut report = ExportReport::default();
    if tables.is_empty() {
        return report;
    }

    if options.csv {
        for table in tables {
            let path = options.csv_path(table.source_index);
            match write_table_csv(table, &path) {
                Ok(()) => {
                    info!("wrote {}", path.display());
                    report.csv_files.push(path);
                }
                Err(e) => {
                    error!("csv write failed for {}: {e}", path.display());
                    report.failures.push(format!("{}: {e}", path.display()));
                }
            }
        }
    }

    if options.workbook {
        let path = options.workbook_path();
        match write_workbook(tables, &path) {
            Ok(()) => {
                info!("wrote {}", path.display());
                report.workbook = Some(path);
            }
            Err(e) => {
                error!("workbook write failed for {}: {e}", path.display());
                report.failures.push(format!("{}: {e}", path.display()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_append_to_base() {
        let options = ExportOptions::new("out/eci_results");
        assert_eq!(options.csv_path(0), PathBuf::from("out/eci_results_table_0.csv"));
        assert_eq!(options.csv_path(7), PathBuf::from("out/eci_results_table_7.csv"));
        assert_eq!(
            options.workbook_path(),
            PathBuf::from("out/eci_results_all_tables.xlsx")
        );
    }

    #[test]
    fn test_format_toggles() {
        let options = ExportOptions::new("x").csv_only();
        assert!(options.csv && !options.workbook);
        let options = ExportOptions::new("x").workbook_only();
        assert!(!options.csv && options.workbook);
    }

    #[test]
    fn test_empty_tables_write_nothing() {
        let report = write_all(&[], &ExportOptions::new("nowhere/should/not/exist"));
        assert!(report.csv_files.is_empty());
        assert!(report.workbook.is_none());
        assert!(report.is_complete());
    }
}
