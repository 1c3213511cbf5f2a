//! The table extractor.

use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::detect;
use crate::error::{Error, Result};
use crate::model::NormalizedTable;

use super::{cell_text, ExtractOptions};

/// Extracts every `<table>` on a page into a [`NormalizedTable`].
///
/// Extraction is a pure function of the document: tables come out in
/// document order, tables with no usable data rows are silently omitted,
/// and the same document always yields the same result.
pub struct TableExtractor {
    options: ExtractOptions,
    tables: Selector,
    rows: Selector,
    cells: Selector,
}

impl TableExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Result<Self> {
        Ok(Self {
            options,
            tables: parse_selector("table")?,
            rows: parse_selector("tr")?,
            cells: parse_selector("th, td")?,
        })
    }

    /// Extract all tables from raw markup.
    ///
    /// Fails only when the payload cannot be treated as an HTML document at
    /// all; individual problem tables are skipped, never fatal.
    pub fn extract(&self, html: &str) -> Result<Vec<NormalizedTable>> {
        detect::ensure_html(html)?;
        let document = Html::parse_document(html);
        Ok(self.extract_document(&document))
    }

    /// Extract all tables from an already-parsed document.
    pub fn extract_document(&self, document: &Html) -> Vec<NormalizedTable> {
        let mut extracted = Vec::new();
        for (index, element) in document.select(&self.tables).enumerate() {
            match self.normalize_table(index, element) {
                Some(table) => {
                    debug!(
                        "table {}: {} rows, {} columns",
                        index,
                        table.row_count(),
                        table.column_count()
                    );
                    extracted.push(table);
                }
                None => debug!("table {}: no data rows, skipped", index),
            }
        }
        extracted
    }

    /// Normalize one `<table>` element, or `None` when it has no data rows.
    fn normalize_table(&self, index: usize, table: ElementRef<'_>) -> Option<NormalizedTable> {
        let rows: Vec<ElementRef<'_>> = table.select(&self.rows).collect();

        // Header: the first row within the lookahead window that has any
        // non-blank cell. Rows past the window never become headers.
        let mut header: Vec<String> = Vec::new();
        let mut header_row = None;
        for (i, row) in rows.iter().take(self.options.header_lookahead).enumerate() {
            let cells = self.row_cells(*row);
            if cells.iter().any(|c| !c.is_empty()) {
                header = cells;
                header_row = Some(i);
                break;
            }
        }

        // Data rows start after the consumed header row. Rows that are
        // entirely blank are dropped and never influence the column count.
        let start = header_row.map_or(0, |i| i + 1);
        let mut data: Vec<Vec<String>> = Vec::new();
        for row in rows.iter().skip(start) {
            let cells = self.row_cells(*row);
            if cells.iter().any(|c| !c.is_empty()) {
                data.push(cells);
            }
        }
        if data.is_empty() {
            return None;
        }

        // Pad ragged rows out to the widest kept row.
        let max_cols = data.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut data {
            row.resize(max_cols, String::new());
        }

        let columns = column_names(&header, max_cols);
        Some(NormalizedTable::new(index, header, columns, data))
    }

    /// All cell texts of one row, in document order.
    fn row_cells(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.cells).map(cell_text).collect()
    }
}

/// Column names for a table `max_cols` wide.
///
/// A header no wider than the table contributes its cells verbatim, with
/// synthesized `Column_<i>` names filling the remainder. No header, or a
/// header wider than the table, yields entirely synthesized names.
fn column_names(header: &[String], max_cols: usize) -> Vec<String> {
    if !header.is_empty() && header.len() <= max_cols {
        let mut names = header.to_vec();
        names.extend((header.len()..max_cols).map(|i| format!("Column_{i}")));
        names
    } else {
        (0..max_cols).map(|i| format!("Column_{i}")).collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Parse(format!("invalid CSS selector '{selector}': {e}")))
}
