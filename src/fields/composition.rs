use super::patterns::PATTERNS;

/// CAS registry numbers anywhere in the document, first occurrence order.
///
/// Shape only; the check digit is not verified.
pub fn extract_cas_numbers(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    PATTERNS
        .cas_number
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .filter(|cas| seen.insert(cas.clone()))
        .collect()
}
