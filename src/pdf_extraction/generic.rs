// Generic pure Rust extraction via the pdf-extract crate
use anyhow::{Context, Result};

use super::extraction_router::{ExtractionMethod, TextStrategy};

pub struct PdfExtractStrategy;

impl TextStrategy for PdfExtractStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PdfExtract
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).context("pdf-extract failed")
    }
}
