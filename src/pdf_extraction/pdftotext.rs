// Layout-aware extraction using poppler's pdftotext
//
// pdftotext -layout keeps column alignment, which helps the label/value
// heuristics on tabular SDS layouts. It wants a file, so the bytes go
// through a temp file first.
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::Command;

use super::extraction_router::{ExtractionMethod, TextStrategy};

pub struct PdfToTextStrategy {
    binary: String,
}

impl PdfToTextStrategy {
    pub fn new() -> Self {
        Self {
            binary: "pdftotext".to_string(),
        }
    }

    /// Use a pdftotext binary other than the one on PATH.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PdfToTextStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStrategy for PdfToTextStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PdfToText
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut input = tempfile::Builder::new()
            .prefix("sds-")
            .suffix(".pdf")
            .tempfile()
            .context("creating temp file for pdftotext")?;
        input.write_all(bytes)?;
        input.flush()?;

        let output = Command::new(&self.binary)
            .arg("-layout")
            .args(["-enc", "UTF-8"])
            .arg(input.path())
            .arg("-") // Output to stdout
            .output()
            .with_context(|| format!("running {}", self.binary))?;

        if !output.status.success() {
            bail!(
                "pdftotext failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_an_error() {
        let strategy = PdfToTextStrategy::with_binary("pdftotext-not-installed-anywhere");
        assert!(strategy.extract(b"%PDF-1.4").is_err());
    }
}
