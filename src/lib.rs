//! # untable
//!
//! HTML table extraction for Rust: fetch a results page, flatten every
//! `<table>` element into a rectangular, column-named structure, and write
//! the lot to CSV files and an XLSX workbook.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untable::{ExportOptions, Untable};
//!
//! fn main() -> untable::Result<()> {
//!     // Fetch a page (HTTP session first, browser fallback) and extract.
//!     let outcome = Untable::new().scrape("https://example.com/results.htm")?;
//!
//!     for table in &outcome.tables {
//!         println!("table {}: {} rows", table.source_index, table.row_count());
//!     }
//!
//!     // Persist: one CSV per table plus a combined workbook.
//!     untable::export::write_all(&outcome.tables, &ExportOptions::new("results"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Uniform tables**: ragged rows padded, blank rows dropped, missing
//!   column names synthesized as `Column_<i>`
//! - **Two fetch strategies**: cookie-carrying HTTP session with browser
//!   headers, then headless Chrome for script-rendered pages
//! - **Faithful output**: CSV and XLSX carry every cell verbatim
//! - **Rounds analytics**: aggregate views over round-wise results CSVs for
//!   the dashboard

pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod rounds;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{write_all, ExportOptions, ExportReport};
pub use extract::{ExtractOptions, TableExtractor};
pub use fetch::{FetchOptions, FetchStrategy};
pub use model::{FetchMethod, NormalizedTable, PageCapture};
pub use rounds::{RoundData, RoundRow};

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};

/// Extract all tables from a string of HTML.
///
/// # Example
///
/// ```
/// let tables = untable::extract_html(
///     "<table><tr><th>A</th></tr><tr><td>1</td></tr></table>",
/// ).unwrap();
/// assert_eq!(tables[0].columns, vec!["A"]);
/// ```
pub fn extract_html(html: &str) -> Result<Vec<NormalizedTable>> {
    TableExtractor::new()?.extract(html)
}

/// Extract all tables from an HTML file on disk.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Vec<NormalizedTable>> {
    let html = fs::read_to_string(path)?;
    extract_html(&html)
}

/// Fetch a URL with the default strategy order and extract its tables.
///
/// # Example
///
/// ```no_run
/// let outcome = untable::scrape_url("https://example.com/results.htm").unwrap();
/// println!("{} tables", outcome.tables.len());
/// ```
pub fn scrape_url(url: &str) -> Result<ScrapeOutcome> {
    Untable::new().scrape(url)
}

/// Builder for the fetch-and-extract pipeline.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use untable::Untable;
///
/// let outcome = Untable::new()
///     .with_timeout(Duration::from_secs(30))
///     .session_only()
///     .scrape("https://example.com/results.htm")?;
/// # Ok::<(), untable::Error>(())
/// ```
pub struct Untable {
    extract_options: ExtractOptions,
    fetch_options: FetchOptions,
    strategies: Vec<FetchStrategy>,
}

impl Untable {
    /// Create a pipeline with default options and strategy order.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            fetch_options: FetchOptions::default(),
            strategies: FetchStrategy::default_order(),
        }
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the fetch options.
    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Replace the strategy order.
    pub fn with_strategies(mut self, strategies: Vec<FetchStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Drop every strategy except the HTTP session.
    pub fn session_only(mut self) -> Self {
        self.strategies = vec![FetchStrategy::Session];
        self
    }

    /// Set the target-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_options = self.fetch_options.with_timeout(timeout);
        self
    }

    /// Disable the human-like request pacing.
    pub fn without_pacing(mut self) -> Self {
        self.fetch_options = self.fetch_options.without_pacing();
        self
    }

    /// Fetch `url`, trying each strategy in order until one yields tables.
    ///
    /// A strategy counts as failed when the request errors, the response is
    /// not HTML, or the page parses but contains no extractable tables; the
    /// next strategy then gets its turn. Only when every strategy fails does
    /// this return [`Error::FetchFailed`], listing what was tried.
    pub fn scrape(&self, url: &str) -> Result<ScrapeOutcome> {
        let extractor = TableExtractor::with_options(self.extract_options.clone())?;
        let mut attempts: Vec<String> = Vec::new();

        for strategy in &self.strategies {
            info!("fetching {url} via {strategy}");
            let capture = match strategy.attempt(url, &self.fetch_options) {
                Ok(capture) => capture,
                Err(e) => {
                    warn!("{strategy} failed: {e}");
                    attempts.push(format!("{strategy}: {e}"));
                    continue;
                }
            };

            match extractor.extract(&capture.html) {
                Ok(tables) if !tables.is_empty() => {
                    info!("{strategy} extracted {} tables from {url}", tables.len());
                    return Ok(ScrapeOutcome { capture, tables });
                }
                Ok(_) => {
                    warn!("{strategy} fetched the page but no tables were extracted");
                    attempts.push(format!("{strategy}: no tables extracted"));
                }
                Err(e) => {
                    warn!("{strategy} capture not usable: {e}");
                    attempts.push(format!("{strategy}: {e}"));
                }
            }
        }

        Err(Error::FetchFailed {
            url: url.to_string(),
            attempts: attempts.join("; "),
        })
    }

    /// Run the extractor over a local HTML file, no network involved.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ScrapeOutcome> {
        let path = path.as_ref();
        let html = fs::read_to_string(path)?;
        let extractor = TableExtractor::with_options(self.extract_options.clone())?;
        let tables = extractor.extract(&html)?;
        Ok(ScrapeOutcome {
            capture: PageCapture::new(path.display().to_string(), html, FetchMethod::File),
            tables,
        })
    }
}

impl Default for Untable {
    fn default() -> Self {
        Self::new()
    }
}

/// A fetched page together with everything extracted from it.
pub struct ScrapeOutcome {
    /// The page capture that produced the tables.
    pub capture: PageCapture,

    /// Extracted tables, in document order.
    pub tables: Vec<NormalizedTable>,
}

impl ScrapeOutcome {
    /// Number of extracted tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Data rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(NormalizedTable::row_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untable_builder() {
        let pipeline = Untable::new()
            .with_timeout(Duration::from_secs(5))
            .without_pacing()
            .session_only();

        assert_eq!(pipeline.fetch_options.timeout, Duration::from_secs(5));
        assert!(!pipeline.fetch_options.pacing);
        assert_eq!(pipeline.strategies, vec![FetchStrategy::Session]);
    }

    #[test]
    fn test_extract_html_shortcut() {
        let tables = extract_html(
            "<html><table><tr><th>H</th></tr><tr><td>v</td></tr></table></html>",
        )
        .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns, vec!["H"]);
    }

    #[test]
    fn test_extract_html_rejects_non_markup() {
        assert!(matches!(extract_html("plain words"), Err(Error::NotHtml(_))));
    }

    #[test]
    fn test_outcome_counts() {
        let outcome = ScrapeOutcome {
            capture: PageCapture::new("x", "<html></html>", FetchMethod::File),
            tables: extract_html(
                "<html>\
                 <table><tr><th>A</th></tr><tr><td>1</td></tr><tr><td>2</td></tr></table>\
                 <table><tr><th>B</th></tr><tr><td>3</td></tr></table>\
                 </html>",
            )
            .unwrap(),
        };
        assert_eq!(outcome.table_count(), 2);
        assert_eq!(outcome.total_rows(), 3);
    }
}
