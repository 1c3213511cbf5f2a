//! Integration tests for CSV/XLSX persistence.

use std::fs;

use untable::{extract_html, write_all, ExportOptions};

const PAGE: &str = "<html>\
                    <table>\
                    <tr><th>Candidate</th><th>Votes</th></tr>\
                    <tr><td>A</td><td>100</td></tr>\
                    <tr><td>B</td><td></td><td>150</td></tr>\
                    </table>\
                    <table>\
                    <tr><th>Round</th></tr>\
                    <tr><td>1</td></tr>\
                    </table>\
                    </html>";

#[test]
fn test_write_all_produces_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("results");

    let tables = extract_html(PAGE).unwrap();
    let report = write_all(&tables, &ExportOptions::new(&base));

    assert!(report.is_complete());
    assert_eq!(report.csv_files.len(), 2);
    assert_eq!(
        report.workbook.as_deref(),
        Some(dir.path().join("results_all_tables.xlsx").as_path())
    );
    for path in &report.csv_files {
        assert!(path.exists(), "{} missing", path.display());
    }
}

#[test]
fn test_csv_preserves_cells_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("results");

    let tables = extract_html(PAGE).unwrap();
    write_all(&tables, &ExportOptions::new(&base).csv_only());

    let contents = fs::read_to_string(dir.path().join("results_table_0.csv")).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("Candidate,Votes,Column_2"));
    assert_eq!(lines.next(), Some("A,100,"));
    assert_eq!(lines.next(), Some("B,,150"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_csv_filenames_follow_source_index() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("results");

    // First table on the page has no data rows, so only table 1 survives
    // and its filename keeps the on-page index.
    let html = "<html>\
                <table><tr><td> </td></tr></table>\
                <table><tr><th>H</th></tr><tr><td>v</td></tr></table>\
                </html>";
    let tables = extract_html(html).unwrap();
    let report = write_all(&tables, &ExportOptions::new(&base).csv_only());

    assert_eq!(report.csv_files.len(), 1);
    assert!(dir.path().join("results_table_1.csv").exists());
}

#[test]
fn test_workbook_failure_keeps_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("results");

    let tables = extract_html(PAGE).unwrap();

    // Occupy the workbook path with a directory so the save fails.
    fs::create_dir_all(dir.path().join("results_all_tables.xlsx")).unwrap();
    let report = write_all(&tables, &ExportOptions::new(&base));

    assert!(!report.is_complete());
    assert!(report.workbook.is_none());
    assert_eq!(report.csv_files.len(), 2);
    for path in &report.csv_files {
        assert!(path.exists());
    }
}

#[test]
fn test_quoting_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("tricky");

    let html = "<html><table>\
                <tr><th>Name</th><th>Note</th></tr>\
                <tr><td>O'BRIEN, PAT</td><td>said \"recount\"</td></tr>\
                </table></html>";
    let tables = extract_html(html).unwrap();
    write_all(&tables, &ExportOptions::new(&base).csv_only());

    let mut reader = csv::Reader::from_path(dir.path().join("tricky_table_0.csv")).unwrap();
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], "O'BRIEN, PAT");
    assert_eq!(&record[1], "said \"recount\"");
}
