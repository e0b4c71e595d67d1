//! Dangerous-goods details from section 14.

use tracing::debug;

use super::patterns::PATTERNS;
use super::{clean_value, labeled_value};
use crate::scoring::{DangerousGoodsScoringPolicy, TransportEvidence};

const MIN_SHIPPING_NAME_CHARS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportInfo {
    pub dangerous_good: bool,
    pub confidence: f64,
    pub un_number: Option<String>,
    pub class: Option<String>,
    pub packing_group: Option<String>,
    pub subsidiary_risks: Option<String>,
}

/// An explicit "not regulated" statement clears every other transport field.
pub fn extract_transport(section_14: &str) -> TransportInfo {
    if section_14.trim().is_empty() {
        return TransportInfo::default();
    }

    let negated = PATTERNS.dg_none.is_match(section_14);
    if negated {
        debug!("section 14 declares the product not regulated for transport");
        let verdict = DangerousGoodsScoringPolicy::default().classify(&TransportEvidence {
            negated,
            ..Default::default()
        });
        return TransportInfo {
            dangerous_good: verdict.value,
            confidence: verdict.confidence,
            ..Default::default()
        };
    }

    let un_number = first_capture(&PATTERNS.un_number, section_14);
    let class = first_capture(&PATTERNS.dg_class, section_14);
    let packing_group = first_capture(&PATTERNS.packing_group, section_14).map(|pg| roman_packing_group(&pg));
    let subsidiary_risks = first_capture(&PATTERNS.subsidiary_risks, section_14)
        .map(|risk| risk.trim().to_string())
        .filter(|risk| !risk.is_empty());

    let verdict = DangerousGoodsScoringPolicy::default().classify(&TransportEvidence {
        negated,
        has_un_number: un_number.is_some(),
        has_class: class.is_some(),
        has_packing_group: packing_group.is_some(),
    });

    TransportInfo {
        dangerous_good: verdict.value,
        confidence: verdict.confidence,
        un_number,
        class,
        packing_group,
        subsidiary_risks,
    }
}

fn first_capture(pattern: &regex::Regex, text: &str) -> Option<String> {
    pattern.captures(text).map(|caps| caps[1].to_string())
}

fn roman_packing_group(raw: &str) -> String {
    match raw {
        "1" => "I".to_string(),
        "2" => "II".to_string(),
        "3" => "III".to_string(),
        other => other.to_ascii_uppercase(),
    }
}

/// The labeled proper shipping name, or failing that a line that reads like
/// one (`UN1987 ALCOHOLS, N.O.S.`).
pub fn extract_proper_shipping_name(section_14: &str) -> Option<String> {
    if let Some(name) = labeled_value(section_14, &PATTERNS.shipping_name_label) {
        // A flattened table row gives column headers, not a name.
        if !PATTERNS.shipping_table_header.is_match(&name) {
            return Some(name);
        }
    }

    section_14
        .lines()
        .filter(|line| PATTERNS.shipping_name_keyword.is_match(line))
        .map(|line| {
            let stripped = PATTERNS.leading_un_number.replace(line, "");
            clean_value(&stripped).to_string()
        })
        .find(|name| name.chars().count() >= MIN_SHIPPING_NAME_CHARS)
}
