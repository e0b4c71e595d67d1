//! The parsed record and the step that assembles it.

use serde::{Deserialize, Serialize};

use crate::fields::ExtractedFields;
use crate::sections::Sections;
use crate::types::Result;

/// Structured metadata pulled out of one Safety Data Sheet.
///
/// Produced once per parse call and never mutated afterwards. Serializes to a
/// flat JSON object whose keys are exactly these field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub product_id: i64,
    pub vendor: Option<String>,
    pub product_name: Option<String>,
    pub product_use: Option<String>,
    /// ISO-8601 when normalization succeeded, otherwise the raw matched token.
    pub issue_date: Option<String>,
    pub hazardous_substance: Option<bool>,
    pub hazardous_confidence: f64,
    pub hazard_statements: Vec<String>,
    pub dangerous_good: bool,
    pub dangerous_goods_confidence: f64,
    pub dangerous_goods_class: Option<String>,
    pub packing_group: Option<String>,
    pub subsidiary_risks: Option<String>,
    pub un_number: Option<String>,
    pub signal_word: Option<String>,
    pub precautionary_statements: Vec<String>,
    pub cas_numbers: Vec<String>,
    pub proper_shipping_name: Option<String>,
    pub section_1_excerpt: Option<String>,
    pub section_2_excerpt: Option<String>,
    pub section_14_excerpt: Option<String>,
    pub section_16_excerpt: Option<String>,
}

impl ParsedDocument {
    /// A record with nothing found, the normal outcome for a textless document.
    pub fn empty(product_id: i64) -> Self {
        Self {
            product_id,
            vendor: None,
            product_name: None,
            product_use: None,
            issue_date: None,
            hazardous_substance: None,
            hazardous_confidence: 0.0,
            hazard_statements: Vec::new(),
            dangerous_good: false,
            dangerous_goods_confidence: 0.0,
            dangerous_goods_class: None,
            packing_group: None,
            subsidiary_risks: None,
            un_number: None,
            signal_word: None,
            precautionary_statements: Vec::new(),
            cas_numbers: Vec::new(),
            proper_shipping_name: None,
            section_1_excerpt: None,
            section_2_excerpt: None,
            section_14_excerpt: None,
            section_16_excerpt: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build the record from extracted fields plus section excerpts.
pub fn assemble(
    product_id: i64,
    fields: ExtractedFields,
    sections: &Sections,
    excerpt_max_chars: usize,
) -> ParsedDocument {
    let excerpt = |n: u8| trim_excerpt(sections.body(n), excerpt_max_chars);
    let transport = fields.transport;

    ParsedDocument {
        product_id,
        vendor: fields.vendor,
        product_name: fields.product_name,
        product_use: fields.product_use,
        issue_date: fields.issue_date,
        hazardous_substance: fields.hazardous.map(|h| h.value),
        hazardous_confidence: fields.hazardous.map(|h| h.confidence).unwrap_or(0.0),
        hazard_statements: fields.hazard_statements,
        dangerous_good: transport.dangerous_good,
        dangerous_goods_confidence: transport.confidence,
        dangerous_goods_class: transport.class,
        packing_group: transport.packing_group,
        subsidiary_risks: transport.subsidiary_risks,
        un_number: transport.un_number,
        signal_word: fields.signal_word,
        precautionary_statements: fields.precautionary_statements,
        cas_numbers: fields.cas_numbers,
        proper_shipping_name: fields.proper_shipping_name,
        section_1_excerpt: excerpt(1),
        section_2_excerpt: excerpt(2),
        section_14_excerpt: excerpt(14),
        section_16_excerpt: excerpt(16),
    }
}

/// Collapse whitespace runs and cap the length in characters.
pub fn trim_excerpt(text: &str, max_chars: usize) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.chars().take(max_chars).collect())
}
