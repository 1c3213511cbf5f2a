//! Normalized table type.

use serde::{Deserialize, Serialize};

/// A rectangular table extracted from one `<table>` element.
///
/// Every row holds exactly `column_count()` cells; short rows were padded
/// with empty strings during extraction. Column names are either the header
/// cells found on the page (extended with synthesized `Column_<i>` names for
/// columns past the header) or entirely synthesized when the page offered no
/// usable header. A `NormalizedTable` is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// 0-based position of the source `<table>` among all table elements on
    /// the page, in document order. Skipped tables still advance this index.
    pub source_index: usize,

    /// Header cells as found on the page (empty when no header was detected).
    pub headers: Vec<String>,

    /// Column names, exactly one per column.
    pub columns: Vec<String>,

    /// Data rows, each exactly as wide as `columns`.
    pub rows: Vec<Vec<String>>,
}

impl NormalizedTable {
    /// Create a table from already-rectangular parts.
    pub fn new(
        source_index: usize,
        headers: Vec<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self {
            source_index,
            headers,
            columns,
            rows,
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether a header row was detected on the page.
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Check that every row is exactly as wide as the column list.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|r| r.len() == self.columns.len())
    }

    /// Worksheet name used when this table lands in a workbook.
    pub fn sheet_name(&self) -> String {
        format!("Table_{}", self.source_index)
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Up to `n` leading rows, for summaries.
    pub fn sample(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> NormalizedTable {
        NormalizedTable::new(
            2,
            vec!["Candidate".into(), "Votes".into()],
            vec!["Candidate".into(), "Votes".into(), "Column_2".into()],
            vec![
                vec!["A".into(), "100".into(), "".into()],
                vec!["B".into(), "".into(), "150".into()],
            ],
        )
    }

    #[test]
    fn test_counts() {
        let table = fixture();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(table.has_header());
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_sheet_name_uses_source_index() {
        assert_eq!(fixture().sheet_name(), "Table_2");
    }

    #[test]
    fn test_column_index() {
        let table = fixture();
        assert_eq!(table.column_index("Votes"), Some(1));
        assert_eq!(table.column_index("Party"), None);
    }

    #[test]
    fn test_sample_clamps() {
        let table = fixture();
        assert_eq!(table.sample(5).len(), 2);
        assert_eq!(table.sample(1).len(), 1);
    }
}
