// lopdf helper - Pure Rust PDF operations
use anyhow::{bail, Result};
use lopdf::Document;

use super::extraction_router::{ExtractionMethod, TextStrategy};

/// Load a PDF document from memory using lopdf
pub fn load_pdf(bytes: &[u8]) -> Result<Document> {
    Ok(Document::load_mem(bytes)?)
}

pub fn page_count(bytes: &[u8]) -> Result<usize> {
    Ok(load_pdf(bytes)?.get_pages().len())
}

/// Fast structured extraction straight from the content streams.
pub struct LopdfStrategy;

impl TextStrategy for LopdfStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Lopdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let document = load_pdf(bytes)?;
        if document.is_encrypted() {
            bail!("document is encrypted");
        }

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        if pages.is_empty() {
            bail!("document has no pages");
        }

        Ok(document.extract_text(&pages)?)
    }
}
