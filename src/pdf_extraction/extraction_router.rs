// Ordered PDF text acquisition
//
// Strategies are tried in a fixed priority order:
//   1. lopdf          - fast, structure-only text extraction
//   2. pdftotext      - layout-aware extraction (poppler, -layout)
//   3. pdf-extract    - generic pure Rust extraction
// The first result with enough characters wins. Failing that, the first
// non-empty result wins. OCR runs only in debug mode and only when every
// strategy came back empty.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, warn};

use super::generic::PdfExtractStrategy;
use super::lopdf_helper::LopdfStrategy;
use super::ocr_engine::OcrEngine;
use super::pdftotext::PdfToTextStrategy;
use crate::config::ParserConfig;

/// Extraction method enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Lopdf,
    PdfToText,
    PdfExtract,
    Ocr,
}

impl ExtractionMethod {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionMethod::Lopdf => "lopdf",
            ExtractionMethod::PdfToText => "pdftotext",
            ExtractionMethod::PdfExtract => "pdf-extract",
            ExtractionMethod::Ocr => "ocr",
        }
    }
}

/// One way of turning raw document bytes into text.
///
/// Implementations return `Err` for anything that goes wrong; the acquirer
/// absorbs those errors, so a strategy never needs to swallow its own.
pub trait TextStrategy: Send + Sync {
    fn method(&self) -> ExtractionMethod;
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extraction result with timing
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub text: String,
    pub method: ExtractionMethod,
    pub extraction_time_ms: u64,
}

impl ExtractionResult {
    pub fn new(text: String, method: ExtractionMethod) -> Self {
        Self {
            text,
            method,
            extraction_time_ms: 0,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Runs the strategy chain for a document.
pub struct TextAcquirer {
    strategies: Vec<Box<dyn TextStrategy>>,
    ocr: Option<Box<dyn TextStrategy>>,
    min_text_chars: usize,
    debug: bool,
}

impl TextAcquirer {
    /// The default chain: lopdf, pdftotext, pdf-extract, with OCR behind debug.
    pub fn new(config: &ParserConfig) -> Self {
        Self::with_strategies(
            config,
            vec![
                Box::new(LopdfStrategy),
                Box::new(PdfToTextStrategy::new()),
                Box::new(PdfExtractStrategy),
            ],
        )
        .with_ocr(Box::new(OcrEngine::new(config.ocr_dpi, &config.ocr_language)))
    }

    pub fn with_strategies(config: &ParserConfig, strategies: Vec<Box<dyn TextStrategy>>) -> Self {
        Self {
            strategies,
            ocr: None,
            min_text_chars: config.min_text_chars,
            debug: config.debug,
        }
    }

    pub fn with_ocr(mut self, ocr: Box<dyn TextStrategy>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Best-effort text for the document, empty when nothing worked.
    pub fn acquire_text(&self, bytes: &[u8]) -> String {
        self.acquire(bytes).map(|r| r.text).unwrap_or_default()
    }

    pub fn acquire(&self, bytes: &[u8]) -> Option<ExtractionResult> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let Some(result) = self.run(strategy.as_ref(), bytes) else {
                continue;
            };
            if result.char_count() >= self.min_text_chars {
                debug!(
                    "{} produced {} chars, accepting",
                    result.method.name(),
                    result.char_count()
                );
                return Some(result);
            }
            attempts.push(result);
        }

        // Nothing reached the bar; settle for the first thing that isn't empty.
        // Strategies are pure, so their first-pass output stands in for a rerun.
        if let Some(result) = attempts.into_iter().find(|r| !r.is_empty()) {
            debug!(
                "no strategy reached {} chars, settling for {} ({} chars)",
                self.min_text_chars,
                result.method.name(),
                result.char_count()
            );
            return Some(result);
        }

        if !self.debug {
            debug!("all strategies came back empty, OCR disabled outside debug mode");
            return None;
        }

        let ocr = self.ocr.as_deref()?;
        self.run(ocr, bytes).filter(|r| !r.is_empty())
    }

    fn run(&self, strategy: &dyn TextStrategy, bytes: &[u8]) -> Option<ExtractionResult> {
        let method = strategy.method();
        let start = Instant::now();

        // Third-party PDF code can panic on malformed input.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| strategy.extract(bytes)));

        match outcome {
            Ok(Ok(text)) => {
                let mut result = ExtractionResult::new(text, method);
                result.extraction_time_ms = start.elapsed().as_millis() as u64;
                debug!(
                    "{} extracted {} chars in {}ms",
                    method.name(),
                    result.char_count(),
                    result.extraction_time_ms
                );
                Some(result)
            }
            Ok(Err(e)) => {
                debug!("{} failed: {:#}", method.name(), e);
                None
            }
            Err(_) => {
                warn!("{} panicked, treating as no text", method.name());
                None
            }
        }
    }
}
