//! Product name and intended use, from section 1.

use super::patterns::PATTERNS;
use super::labeled_value;

/// Only the top of section 1 is scanned for an unlabeled name.
const HEAD_LINES: usize = 6;
const MIN_NAME_WORDS: usize = 2;
const MAX_NAME_WORDS: usize = 12;

pub fn extract_product_name(section_1: &str, full_text: &str) -> Option<String> {
    labeled_value(section_1, &PATTERNS.product_label)
        .or_else(|| unlabeled_name(section_1))
        .or_else(|| labeled_value(full_text, &PATTERNS.product_label))
}

fn unlabeled_name(section_1: &str) -> Option<String> {
    section_1
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(HEAD_LINES)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    let words = line.split_whitespace().count();
    (MIN_NAME_WORDS..=MAX_NAME_WORDS).contains(&words)
        && !line.contains(':')
        && !line.starts_with(|c: char| c.is_ascii_digit())
        && !PATTERNS.boilerplate_title.is_match(line)
        && !PATTERNS.product_label.is_match(line)
        && !PATTERNS.contact_tokens.is_match(line)
}

/// Labeled use in section 1, then anywhere in the document.
pub fn extract_product_use(section_1: &str, full_text: &str) -> Option<String> {
    [section_1, full_text].into_iter().find_map(|scope| {
        labeled_value(scope, &PATTERNS.product_use_label)
            .or_else(|| labeled_value(scope, &PATTERNS.bare_use_label))
    })
}
