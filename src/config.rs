// Configuration for the SDS parser
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{Result, SdsError};

// Text acquisition
pub const MIN_TEXT_CHARS: usize = 800;
pub const OCR_DPI: u32 = 300;
pub const OCR_LANGUAGE: &str = "eng";

// Output shaping
pub const EXCERPT_MAX_CHARS: usize = 900;

// Issue dates further ahead than this are treated as misreads
pub const MAX_FUTURE_DAYS: i64 = 60;

// Byte acquisition
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Everything the engine needs to know about its environment.
///
/// Built once by the caller and handed to [`crate::SdsParser`]; the engine
/// itself never consults environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Verbose strategy logging plus the OCR fallback.
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    #[serde(default = "default_excerpt_max_chars")]
    pub excerpt_max_chars: usize,
    #[serde(default = "default_max_future_days")]
    pub max_future_days: i64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_ocr_dpi")]
    pub ocr_dpi: u32,
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    /// Pins "today" for the issue-date bound. `None` uses the local date.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_min_text_chars() -> usize { MIN_TEXT_CHARS }
fn default_excerpt_max_chars() -> usize { EXCERPT_MAX_CHARS }
fn default_max_future_days() -> i64 { MAX_FUTURE_DAYS }
fn default_fetch_timeout_secs() -> u64 { FETCH_TIMEOUT_SECS }
fn default_ocr_dpi() -> u32 { OCR_DPI }
fn default_ocr_language() -> String { OCR_LANGUAGE.to_string() }

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            debug: false,
            min_text_chars: default_min_text_chars(),
            excerpt_max_chars: default_excerpt_max_chars(),
            max_future_days: default_max_future_days(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            ocr_dpi: default_ocr_dpi(),
            ocr_language: default_ocr_language(),
            reference_date: None,
        }
    }
}

impl ParserConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SdsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| SdsError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| SdsError::Config(e.to_string()))?;
        fs::write(path, content).map_err(|source| SdsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The date the future-date bound is measured from.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
