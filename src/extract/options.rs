//! Extraction options.

/// Options for table extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How many leading rows to scan for a header (first match wins).
    pub header_lookahead: usize,
}

impl ExtractOptions {
    /// Create extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header scan depth.
    pub fn with_header_lookahead(mut self, rows: usize) -> Self {
        self.header_lookahead = rows;
        self
    }

    /// Disable header detection entirely; every row becomes data.
    pub fn headerless(mut self) -> Self {
        self.header_lookahead = 0;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_lookahead: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.header_lookahead, 2);
    }

    #[test]
    fn test_builder() {
        let options = ExtractOptions::new().with_header_lookahead(1);
        assert_eq!(options.header_lookahead, 1);

        let options = ExtractOptions::new().headerless();
        assert_eq!(options.header_lookahead, 0);
    }
}
