//! Fetched-page capture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which fetch strategy produced a page capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMethod {
    /// Direct HTTP GET on a cookie-carrying session.
    Session,
    /// Rendered page source captured from a controlled browser.
    Browser,
    /// Loaded from a local file, no network involved.
    File,
}

impl std::fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMethod::Session => write!(f, "http session"),
            FetchMethod::Browser => write!(f, "browser"),
            FetchMethod::File => write!(f, "file"),
        }
    }
}

/// The raw HTML of one fetched page plus provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    /// Where the page came from (URL or file path).
    pub source: String,

    /// Raw page markup.
    pub html: String,

    /// Strategy that produced the capture.
    pub method: FetchMethod,

    /// When the capture was taken.
    pub fetched_at: DateTime<Utc>,
}

impl PageCapture {
    /// Create a capture stamped with the current time.
    pub fn new(source: impl Into<String>, html: impl Into<String>, method: FetchMethod) -> Self {
        Self {
            source: source.into(),
            html: html.into(),
            method,
            fetched_at: Utc::now(),
        }
    }

    /// Size of the captured markup in bytes.
    pub fn len(&self) -> usize {
        self.html.len()
    }

    /// Whether the capture body is empty.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_new() {
        let capture = PageCapture::new("https://example.com", "<html></html>", FetchMethod::Session);
        assert_eq!(capture.source, "https://example.com");
        assert_eq!(capture.len(), 13);
        assert!(!capture.is_empty());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(FetchMethod::Session.to_string(), "http session");
        assert_eq!(FetchMethod::Browser.to_string(), "browser");
        assert_eq!(FetchMethod::File.to_string(), "file");
    }
}
