// PDF text acquisition module
pub mod extraction_router;
pub mod generic;
pub mod lopdf_helper;
pub mod ocr_engine;
pub mod pdftotext;

pub use extraction_router::{ExtractionMethod, ExtractionResult, TextAcquirer, TextStrategy};
pub use generic::PdfExtractStrategy;
pub use lopdf_helper::LopdfStrategy;
pub use ocr_engine::OcrEngine;
pub use pdftotext::PdfToTextStrategy;

/// Tidy raw extractor output before segmentation.
pub fn normalize_text(text: &str) -> String {
    text.replace('\0', " ").replace("\r\n", "\n").replace('\r', "\n")
}
