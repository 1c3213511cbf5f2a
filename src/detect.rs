//! HTML payload detection.
//!
//! Fetch strategies can receive anything from a block page to a JSON error
//! body. This module answers the cheap question "does this payload look like
//! an HTML document" before the extractor is asked to work on it.

use crate::error::{Error, Result};

/// How far into the payload to look for markup markers.
const SNIFF_WINDOW: usize = 1024;

/// Markers that identify an HTML document near the start of the payload.
const HTML_MARKERS: [&str; 4] = ["<!doctype html", "<html", "<head", "<body"];

/// Check whether a payload looks like an HTML document.
///
/// The check is intentionally shallow: leading whitespace and a UTF-8 BOM
/// are skipped, then the first [`SNIFF_WINDOW`] bytes are scanned for a
/// doctype or a well-known root tag. A bare table fragment (`<table>...`)
/// also qualifies, since rendered page captures sometimes start mid-body.
///
/// # Example
/// ```
/// use untable::detect::looks_like_html;
///
/// assert!(looks_like_html("<!DOCTYPE html><html><body></body></html>"));
/// assert!(!looks_like_html("{\"error\": \"blocked\"}"));
/// ```
pub fn looks_like_html(payload: &str) -> bool {
    let trimmed = payload.trim_start_matches('\u{feff}').trim_start();
    if trimmed.is_empty() {
        return false;
    }

    let mut end = trimmed.len().min(SNIFF_WINDOW);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    let lower = trimmed[..end].to_ascii_lowercase();

    HTML_MARKERS.iter().any(|m| lower.contains(m)) || lower.starts_with("<table")
}

/// Validate that a payload is HTML, returning [`Error::NotHtml`] otherwise.
///
/// The error message carries a short prefix of the offending payload so
/// fetch diagnostics can show what the server actually returned.
pub fn ensure_html(payload: &str) -> Result<()> {
    if looks_like_html(payload) {
        return Ok(());
    }

    let preview: String = payload.trim_start().chars().take(40).collect();
    if preview.is_empty() {
        Err(Error::NotHtml("empty body".into()))
    } else {
        Err(Error::NotHtml(format!("body starts with {:?}", preview)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctype_detected() {
        assert!(looks_like_html("<!DOCTYPE html>\n<html lang=\"en\"></html>"));
    }

    #[test]
    fn test_fragment_detected() {
        assert!(looks_like_html("<table><tr><td>1</td></tr></table>"));
    }

    #[test]
    fn test_leading_whitespace_and_bom() {
        assert!(looks_like_html("\u{feff}\n  <html><body></body></html>"));
    }

    #[test]
    fn test_json_rejected() {
        assert!(!looks_like_html("{\"status\": \"denied\"}"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(!looks_like_html(""));
        assert!(!looks_like_html("   \n\t"));
    }

    #[test]
    fn test_ensure_html_error_preview() {
        let err = ensure_html("Access denied by upstream firewall").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Access denied"));
    }
}
