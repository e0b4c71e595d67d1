// OCR fallback: rasterize pages with pdftoppm, recognize with tesseract
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

use super::extraction_router::{ExtractionMethod, TextStrategy};
use super::lopdf_helper;

pub struct OcrEngine {
    dpi: u32,
    language: String,
}

impl OcrEngine {
    pub fn new(dpi: u32, language: &str) -> Self {
        Self {
            dpi,
            language: language.to_string(),
        }
    }

    pub fn is_available() -> bool {
        let pdftoppm = Command::new("pdftoppm").arg("-v").output().is_ok();
        let tesseract = Command::new("tesseract").arg("--version").output().is_ok();
        pdftoppm && tesseract
    }

    fn rasterize(&self, bytes: &[u8], workdir: &std::path::Path) -> Result<Vec<PathBuf>> {
        let input = workdir.join("input.pdf");
        fs::write(&input, bytes)?;

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input)
            .arg(workdir.join("page"))
            .output()
            .context("running pdftoppm")?;

        if !output.status.success() {
            bail!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // pdftoppm zero-pads page numbers, so name order is page order
        let mut pages: Vec<PathBuf> = fs::read_dir(workdir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
            .collect();
        pages.sort();
        Ok(pages)
    }

    fn recognize(&self, image: &std::path::Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .context("running tesseract")?;

        if !output.status.success() {
            bail!(
                "tesseract failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl TextStrategy for OcrEngine {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Ocr
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if !Self::is_available() {
            debug!("OCR: pdftoppm or tesseract not installed, skipping");
            return Ok(String::new());
        }
        if let Ok(count) = lopdf_helper::page_count(bytes) {
            debug!("OCR: rasterizing {} pages at {} dpi", count, self.dpi);
        }

        let workdir = tempfile::tempdir().context("creating OCR work dir")?;
        let pages = self.rasterize(bytes, workdir.path())?;
        if pages.is_empty() {
            bail!("pdftoppm produced no images");
        }

        let mut text = String::new();
        for (idx, page) in pages.iter().enumerate() {
            match self.recognize(page) {
                Ok(page_text) if !page_text.trim().is_empty() => {
                    if !text.is_empty() {
                        text.push_str("\n\n");
                    }
                    text.push_str(&page_text);
                }
                Ok(_) => debug!("OCR page {}/{}: no text", idx + 1, pages.len()),
                Err(e) => warn!("OCR failed for page {}/{}: {:#}", idx + 1, pages.len(), e),
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tools_or_bad_input_yield_no_text() {
        let engine = OcrEngine::new(150, "eng");
        match engine.extract(b"not a pdf") {
            Ok(text) => assert!(text.is_empty()),
            Err(_) => assert!(OcrEngine::is_available()),
        }
    }

    #[test]
    fn test_skips_without_tools() {
        if OcrEngine::is_available() {
            return;
        }
        let engine = OcrEngine::new(300, "eng");
        assert_eq!(engine.extract(b"%PDF-1.4").unwrap(), "");
    }
}
