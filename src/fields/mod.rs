// Field extractors: one module per group of SDS fields
pub mod composition;
pub mod dates;
pub mod ghs;
pub mod hazards;
pub mod patterns;
pub mod product;
pub mod transport;
pub mod vendor;

use std::panic::{self, AssertUnwindSafe};

use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use crate::scoring::Classification;
use crate::sections::Sections;

pub use dates::{normalize_date, IssueDateResolver};
pub use transport::TransportInfo;

/// Everything the extractors found, before it becomes a `ParsedDocument`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub vendor: Option<String>,
    pub product_name: Option<String>,
    pub product_use: Option<String>,
    pub issue_date: Option<String>,
    pub hazardous: Option<Classification>,
    pub hazard_statements: Vec<String>,
    pub transport: TransportInfo,
    pub proper_shipping_name: Option<String>,
    pub signal_word: Option<String>,
    pub precautionary_statements: Vec<String>,
    pub cas_numbers: Vec<String>,
}

/// Runs every extractor over one document.
pub struct FieldExtractor {
    issue_dates: IssueDateResolver,
}

impl FieldExtractor {
    pub fn new(today: NaiveDate, max_future_days: i64) -> Self {
        Self {
            issue_dates: IssueDateResolver::new(today, max_future_days),
        }
    }

    /// A failing extractor leaves only its own field empty.
    pub fn extract(&self, sections: &Sections, text: &str) -> ExtractedFields {
        let s1 = sections.body(1);
        let s2 = sections.body(2);
        let s14 = sections.body(14);
        let s16 = sections.body(16);

        ExtractedFields {
            vendor: isolated("vendor", || vendor::extract_vendor(s1, s16, text)),
            product_name: isolated("product_name", || product::extract_product_name(s1, text)),
            product_use: isolated("product_use", || product::extract_product_use(s1, text)),
            issue_date: isolated("issue_date", || self.issue_dates.resolve(s16, text)),
            hazardous: isolated("hazardous_substance", || hazards::classify_hazardous(s2, text)),
            hazard_statements: isolated("hazard_statements", || {
                hazards::extract_hazard_statements(s2, text)
            }),
            transport: isolated("dangerous_goods", || transport::extract_transport(s14)),
            proper_shipping_name: isolated("proper_shipping_name", || {
                transport::extract_proper_shipping_name(s14)
            }),
            signal_word: isolated("signal_word", || ghs::extract_signal_word(s2, text)),
            precautionary_statements: isolated("precautionary_statements", || {
                ghs::extract_precautionary_statements(s2, text)
            }),
            cas_numbers: isolated("cas_numbers", || composition::extract_cas_numbers(text)),
        }
    }
}

/// Run one extractor, falling back to the field's empty value if it panics.
pub(crate) fn isolated<T: Default>(field: &'static str, extract: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(extract)) {
        Ok(value) => value,
        Err(_) => {
            warn!(field = field, "extractor panicked, leaving field empty");
            T::default()
        }
    }
}

/// Value following a label: the rest of the label's line, or the next
/// non-empty line when the label stands alone.
///
/// A label line whose remainder reads as a continued heading ("... of the
/// substance and uses advised against") also defers to the next line.
pub(crate) fn labeled_value(text: &str, label: &Regex) -> Option<String> {
    for m in label.find_iter(text) {
        let line_end = line_end(text, m.end());
        let rest = clean_value(&text[m.end()..line_end]);
        if !rest.is_empty() && !continues_heading(rest) {
            return Some(rest.to_string());
        }

        let next = text[line_end..].lines().map(str::trim).find(|l| !l.is_empty());
        if let Some(next) = next {
            // Another label on the next line gets its own turn.
            if !label.is_match(next) {
                return Some(next.to_string());
            }
        }
    }
    None
}

pub(crate) fn line_end(text: &str, from: usize) -> usize {
    text[from..].find('\n').map(|i| from + i).unwrap_or(text.len())
}

pub(crate) fn clean_value(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .trim_end()
}

fn continues_heading(rest: &str) -> bool {
    let first = rest.split_whitespace().next().unwrap_or("");
    matches!(first, "of" | "and" | "or" | "for" | "&")
}
