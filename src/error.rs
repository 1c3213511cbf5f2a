//! Error types for the untable library.

use std::io;
use thiserror::Error;

/// Result type alias for untable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fetching, extracting, or persisting tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The payload is not recognizable as an HTML document.
    #[error("Not an HTML document: {0}")]
    NotHtml(String),

    /// Error interpreting document markup (e.g. an invalid selector).
    #[error("Markup error: {0}")]
    Parse(String),

    /// HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The target URL could not be interpreted.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Browser automation failed (launch, navigation, or element wait).
    #[error("Browser error: {0}")]
    Browser(String),

    /// Every configured fetch strategy failed for the URL.
    #[error("All fetch strategies failed for {url}: {attempts}")]
    FetchFailed { url: String, attempts: String },

    /// Error reading or writing delimited output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error producing the XLSX workbook.
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// A required column is missing from a rounds CSV.
    #[error("Missing column in rounds data: {0}")]
    MissingColumn(String),

    /// A rounds CSV contained no usable rows.
    #[error("No usable rows in rounds data")]
    EmptyData,

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
