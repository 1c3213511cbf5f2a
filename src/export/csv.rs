//! CSV output.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::NormalizedTable;

/// Write one table to a CSV file: column names first, then every data row
/// verbatim, padding cells included.
pub fn write_table_csv(table: &NormalizedTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> NormalizedTable {
        NormalizedTable::new(
            0,
            vec!["Candidate".into(), "Votes".into()],
            vec!["Candidate".into(), "Votes".into(), "Column_2".into()],
            vec![
                vec!["A".into(), "100".into(), "".into()],
                vec!["B".into(), "".into(), "150".into()],
            ],
        )
    }

    #[test]
    fn test_csv_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        write_table_csv(&fixture(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Candidate,Votes,Column_2\nA,100,\nB,,150\n");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/t.csv");
        write_table_csv(&fixture(), &path).unwrap();
        assert!(path.exists());
    }
}
