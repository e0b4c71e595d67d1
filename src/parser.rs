//! Entry points: bytes, text, a file path, or a URL in; a `ParsedDocument` out.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::document::{self, ParsedDocument};
use crate::fetch;
use crate::fields::FieldExtractor;
use crate::pdf_extraction::{normalize_text, TextAcquirer};
use crate::sections;
use crate::types::Result;

/// Holds only configuration and the (stateless) acquisition chain, so one
/// parser can be shared across threads.
pub struct SdsParser {
    config: ParserConfig,
    acquirer: TextAcquirer,
}

impl SdsParser {
    pub fn new(config: ParserConfig) -> Self {
        let acquirer = TextAcquirer::new(&config);
        Self { config, acquirer }
    }

    /// Use a custom acquisition chain, mostly for tests.
    pub fn with_acquirer(config: ParserConfig, acquirer: TextAcquirer) -> Self {
        Self { config, acquirer }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Never fails: unreadable input just yields an empty record.
    pub fn parse_bytes(&self, bytes: &[u8], product_id: i64) -> ParsedDocument {
        let start = Instant::now();
        let text = match self.acquirer.acquire(bytes) {
            Some(result) => {
                info!(
                    "product {}: {} chars via {}",
                    product_id,
                    result.char_count(),
                    result.method.name()
                );
                result.text
            }
            None => {
                warn!("product {}: no text could be extracted", product_id);
                String::new()
            }
        };

        let parsed = self.parse_text(&text, product_id);
        info!(
            "product {}: parsed in {}ms",
            product_id,
            start.elapsed().as_millis()
        );
        parsed
    }

    /// Run segmentation and field extraction over already-extracted text.
    pub fn parse_text(&self, text: &str, product_id: i64) -> ParsedDocument {
        let text = normalize_text(text);
        if text.trim().is_empty() {
            return ParsedDocument::empty(product_id);
        }

        let sections = sections::segment(&text);
        if sections.is_empty() {
            warn!("product {}: no section headers found", product_id);
        }

        let extractor = FieldExtractor::new(self.config.today(), self.config.max_future_days);
        let fields = extractor.extract(&sections, &text);
        document::assemble(product_id, fields, &sections, self.config.excerpt_max_chars)
    }

    pub fn parse_path(&self, path: &Path, product_id: i64) -> Result<ParsedDocument> {
        let bytes = fetch::read_pdf(path)?;
        Ok(self.parse_bytes(&bytes, product_id))
    }

    pub fn parse_url(&self, url: &str, product_id: i64) -> Result<ParsedDocument> {
        let timeout = Duration::from_secs(self.config.fetch_timeout_secs);
        let bytes = fetch::fetch_pdf(url, timeout)?;
        Ok(self.parse_bytes(&bytes, product_id))
    }
}

impl Default for SdsParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf_extraction::{ExtractionMethod, TextStrategy};

    struct Canned(&'static str);

    impl TextStrategy for Canned {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::PdfExtract
        }

        fn extract(&self, _bytes: &[u8]) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn parser(text: &'static str) -> SdsParser {
        let config = ParserConfig::default();
        let acquirer = TextAcquirer::with_strategies(&config, vec![Box::new(Canned(text))]);
        SdsParser::with_acquirer(config, acquirer)
    }

    #[test]
    fn test_empty_text_gives_empty_record() {
        let doc = parser("").parse_bytes(b"%PDF-1.4", 9);
        assert_eq!(doc, ParsedDocument::empty(9));
    }

    #[test]
    fn test_parse_bytes_uses_acquired_text() {
        let doc = parser("SECTION 1: Identification\r\nProduct name: Hand Rub\r\n").parse_bytes(b"%PDF", 1);
        assert_eq!(doc.product_name.as_deref(), Some("Hand Rub"));
        assert_eq!(doc.section_1_excerpt.as_deref(), Some("Identification Product name: Hand Rub"));
    }

    #[test]
    fn test_text_without_headers_still_parses() {
        let doc = parser("").parse_text("Product name: Hand Rub\nCAS 64-17-5", 2);
        assert_eq!(doc.product_name.as_deref(), Some("Hand Rub"));
        assert_eq!(doc.cas_numbers, vec!["64-17-5"]);
        assert_eq!(doc.section_1_excerpt, None);
    }
}
