//! Supplier / manufacturer name.

use super::patterns::PATTERNS;

/// How many lines below a bare supplier label to look for the name.
const LOOKAHEAD_LINES: usize = 5;

/// Search order: "Prepared by" in section 16, supplier labels in section 1,
/// then the same labels anywhere in the document.
pub fn extract_vendor(section_1: &str, section_16: &str, full_text: &str) -> Option<String> {
    prepared_by(section_16)
        .or_else(|| from_supplier_labels(section_1))
        .or_else(|| from_supplier_labels(full_text))
        .or_else(|| prepared_by(full_text))
}

/// At least two words and nothing that looks like contact details.
pub fn is_plausible_vendor(candidate: &str) -> bool {
    candidate.split_whitespace().count() >= 2 && !PATTERNS.contact_tokens.is_match(candidate)
}

fn prepared_by(text: &str) -> Option<String> {
    PATTERNS.prepared_by.captures_iter(text).find_map(|caps| {
        let value = PATTERNS.vendor_trailing_noise.replace(caps[1].trim(), "");
        let value = tidy(&value);
        is_plausible_vendor(value).then(|| value.to_string())
    })
}

fn from_supplier_labels(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    // Inline values first: "Supplier: Acme Chemicals Ltd".
    for line in &lines {
        let Some(caps) = PATTERNS.vendor_label_line.captures(line) else {
            continue;
        };
        let value = tidy(&caps[1]);
        if value.is_empty() {
            continue;
        }
        if let Some(vendor) = inline_candidate(value) {
            return Some(vendor);
        }
    }

    // Then a bare label with the name on a following line.
    for (idx, line) in lines.iter().enumerate() {
        let bare_label = PATTERNS
            .vendor_label_line
            .captures(line)
            .map(|caps| tidy(&caps[1]).is_empty())
            .unwrap_or(false);
        if !bare_label && !PATTERNS.supplier_details_line.is_match(line) {
            continue;
        }

        let found = lines
            .iter()
            .skip(idx + 1)
            .filter(|l| !l.is_empty())
            .take(LOOKAHEAD_LINES)
            .find(|l| is_name_line(l));
        if let Some(name) = found {
            return Some(tidy(name).to_string());
        }
    }

    None
}

// "Acme Chemicals, 12 Main Street" keeps the part before the address.
fn inline_candidate(value: &str) -> Option<String> {
    if is_plausible_vendor(value) {
        return Some(value.to_string());
    }
    let head = tidy(value.split(',').next().unwrap_or(""));
    is_plausible_vendor(head).then(|| head.to_string())
}

fn is_name_line(line: &str) -> bool {
    !line.ends_with(':')
        && !PATTERNS.vendor_label_line.is_match(line)
        && !PATTERNS.supplier_details_line.is_match(line)
        && !PATTERNS.digit_run.is_match(line)
        && is_plausible_vendor(line)
}

fn tidy(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '-') || c.is_whitespace())
}
