//! Hazard classification and H-statements, from section 2.

use regex::Regex;

use super::patterns::PATTERNS;
use crate::scoring::{Classification, HazardEvidence, HazardScoringPolicy};

/// Stands in for the statement list when the document says it has none.
pub const NO_CLASSIFICATION: &str = "No classification";

// Section 2 when the document has one, otherwise everything.
fn scope<'a>(section_2: &'a str, full_text: &'a str) -> &'a str {
    if section_2.trim().is_empty() {
        full_text
    } else {
        section_2
    }
}

pub fn hazard_evidence(text: &str) -> HazardEvidence {
    HazardEvidence {
        negated: PATTERNS.hazard_none.is_match(text),
        has_statements: PATTERNS.hazard_code.is_match(text),
        has_keyword: PATTERNS.hazard_keyword.is_match(text),
    }
}

/// `None` when there is no text to judge at all.
pub fn classify_hazardous(section_2: &str, full_text: &str) -> Option<Classification> {
    let text = scope(section_2, full_text);
    if text.trim().is_empty() {
        return None;
    }
    Some(HazardScoringPolicy::default().classify(&hazard_evidence(text)))
}

pub fn extract_hazard_statements(section_2: &str, full_text: &str) -> Vec<String> {
    let text = scope(section_2, full_text);
    let statements = coded_statements(text, &PATTERNS.hazard_code);
    if statements.is_empty() && PATTERNS.hazard_none.is_match(text) {
        return vec![NO_CLASSIFICATION.to_string()];
    }
    statements
}

/// Every code on every line, each paired with the text up to the next code.
/// H- and P-codes cut each other's text short, so flattened label blocks
/// split cleanly.
///
/// Combined codes (`P301+P310`) stay together. Duplicates are kept in
/// document order.
pub(crate) fn coded_statements(text: &str, code: &Regex) -> Vec<String> {
    let mut statements = Vec::new();

    for line in text.lines() {
        let matches: Vec<_> = code.find_iter(line).collect();
        for (idx, m) in matches.iter().enumerate() {
            let next = matches.get(idx + 1).map(|next| next.start()).unwrap_or(line.len());
            let end = PATTERNS
                .any_statement_code
                .find(&line[m.end()..next])
                .map(|other| m.end() + other.start())
                .unwrap_or(next);
            let label = normalize_code(m.as_str());
            let description = line[m.end()..end]
                .trim_start_matches(|c: char| matches!(c, ':' | '-' | '.' | ',' | ';') || c.is_whitespace())
                .trim_end_matches(|c: char| matches!(c, ',' | ';') || c.is_whitespace());

            if description.is_empty() {
                statements.push(label);
            } else {
                statements.push(format!("{} {}", label, description));
            }
        }
    }

    statements
}

fn normalize_code(raw: &str) -> String {
    raw.split('+')
        .map(|part| {
            let part = part.trim();
            // Keep suffix letters as written (H360Fd), only the prefix is uppercased.
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}
