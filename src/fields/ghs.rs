//! GHS label elements: signal word and precautionary statements.

use super::hazards::coded_statements;
use super::patterns::PATTERNS;

pub fn extract_signal_word(section_2: &str, full_text: &str) -> Option<String> {
    [section_2, full_text].into_iter().find_map(|scope| {
        let caps = PATTERNS.signal_word.captures(scope)?;
        Some(if caps[1].eq_ignore_ascii_case("danger") {
            "Danger".to_string()
        } else {
            "Warning".to_string()
        })
    })
}

/// P-codes with their text, section 2 first and the whole document when
/// section 2 is missing.
pub fn extract_precautionary_statements(section_2: &str, full_text: &str) -> Vec<String> {
    let text = if section_2.trim().is_empty() {
        full_text
    } else {
        section_2
    };
    coded_statements(text, &PATTERNS.precaution_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Signal word: DANGER", Some("Danger"))]
    #[case("Signal Word\nwarning", Some("Warning"))]
    #[case("Signal word - Danger", Some("Danger"))]
    #[case("Danger! Keep away from heat.", None)]
    fn test_signal_word(#[case] s2: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_signal_word(s2, "").as_deref(), expected);
    }

    #[test]
    fn test_signal_word_from_full_text() {
        assert_eq!(
            extract_signal_word("Hazards identification", "Label\nSignal word: Warning").as_deref(),
            Some("Warning")
        );
    }

    #[test]
    fn test_combined_precautionary_codes() {
        let s2 = "P210 Keep away from heat.\nP301+P310 IF SWALLOWED: Immediately call a POISON CENTER.\nP305 + P351 + P338 IF IN EYES: Rinse cautiously.";
        assert_eq!(
            extract_precautionary_statements(s2, ""),
            vec![
                "P210 Keep away from heat.",
                "P301+P310 IF SWALLOWED: Immediately call a POISON CENTER.",
                "P305+P351+P338 IF IN EYES: Rinse cautiously."
            ]
        );
    }

    #[test]
    fn test_precautionary_full_text_fallback() {
        assert_eq!(
            extract_precautionary_statements("", "P102 Keep out of reach of children."),
            vec!["P102 Keep out of reach of children."]
        );
    }

    #[test]
    fn test_no_precautionary_statements() {
        assert!(extract_precautionary_statements("Hazards identification", "P102 elsewhere").is_empty());
    }
}
