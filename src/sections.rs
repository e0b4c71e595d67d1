//! Splitting SDS text into its numbered sections.
//!
//! Headers are recognised at line starts in any of these shapes:
//! `SECTION 2: Hazards identification`, `Section two - ...`,
//! `2. Hazards identification`, `14 Transport information`.
//! Subsection numbers (`1.3`) and dates (`13/04/2023`) are not headers.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

pub const FIRST_SECTION: u8 = 1;
pub const LAST_SECTION: u8 = 16;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(section[ \t]*)?(\d{1,2}|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen)\b",
    )
    .expect("section header pattern")
});

const NUMBER_WORDS: [&str; 16] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
];

/// Section number to body text. Absent sections read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    bodies: BTreeMap<u8, String>,
}

impl Sections {
    /// Body of section `number`, or `""` when the document has none.
    pub fn body(&self, number: u8) -> &str {
        self.bodies.get(&number).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, number: u8) -> bool {
        self.bodies.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.bodies.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.bodies.iter().map(|(n, body)| (*n, body.as_str()))
    }

    // A repeated section keeps whichever body is longer.
    fn insert(&mut self, number: u8, body: &str) {
        let body = body.trim();
        match self.bodies.get(&number) {
            Some(existing) if existing.chars().count() >= body.chars().count() => {}
            _ => {
                self.bodies.insert(number, body.to_string());
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    number: u8,
    line_start: usize,
    body_start: usize,
}

/// Split `text` into numbered sections.
///
/// Each body runs from just after its header's number to the start of the
/// next header line, so the section title stays in the body.
pub fn segment(text: &str) -> Sections {
    let headers = find_headers(text);
    let mut sections = Sections::default();

    for (idx, header) in headers.iter().enumerate() {
        let end = headers
            .get(idx + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len());
        sections.insert(header.number, &text[header.body_start..end]);
    }

    debug!(
        "segmented {} headers into sections {:?}",
        headers.len(),
        sections.numbers().collect::<Vec<_>>()
    );
    sections
}

fn find_headers(text: &str) -> Vec<Header> {
    HEADER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let token = caps.get(2)?;
            let has_keyword = caps.get(1).is_some();
            let number = parse_number(token.as_str(), has_keyword)?;

            let line_end = text[whole.end()..]
                .find('\n')
                .map(|i| whole.end() + i)
                .unwrap_or(text.len());
            let rest = &text[whole.end()..line_end];
            let title_offset = accept_header(rest, has_keyword)?;

            Some(Header {
                number,
                line_start: whole.start(),
                body_start: whole.end() + title_offset,
            })
        })
        .collect()
}

fn parse_number(token: &str, has_keyword: bool) -> Option<u8> {
    let number = match token.parse::<u8>() {
        Ok(n) => n,
        // Spelled-out numbers only count after the word "Section".
        Err(_) if has_keyword => {
            let lower = token.to_ascii_lowercase();
            NUMBER_WORDS.iter().position(|w| *w == lower)? as u8 + 1
        }
        Err(_) => return None,
    };
    (FIRST_SECTION..=LAST_SECTION).contains(&number).then_some(number)
}

/// Checks the remainder of a candidate header line and returns the byte
/// offset where the title begins.
fn accept_header(rest: &str, has_keyword: bool) -> Option<usize> {
    let mut chars = rest.char_indices().peekable();

    // Dates and numbered lists: `13/04/2023`, `14-05-2022`, `1,5`.
    if let Some(&(_, c)) = chars.peek() {
        if matches!(c, '/' | '-' | ',') && rest[c.len_utf8()..].starts_with(|d: char| d.is_ascii_digit()) {
            return None;
        }
        // Chemical names in composition tables: `2-Propanol`.
        if !has_keyword && matches!(c, '-' | '\u{2013}' | '\u{2014}') {
            return None;
        }
    }

    while let Some(&(_, c)) = chars.peek() {
        if c == ' ' || c == '\t' {
            chars.next();
        } else {
            break;
        }
    }

    if let Some(&(i, c)) = chars.peek() {
        if matches!(c, '.' | ':' | ')' | '-' | '\u{2013}' | '\u{2014}') {
            let after = &rest[i + c.len_utf8()..];
            // Subsection numbers: `1.3 Details of the supplier`.
            if after.starts_with(|d: char| d.is_ascii_digit()) {
                return None;
            }
            chars.next();
        }
    }

    let title_offset = chars.peek().map(|&(i, _)| i).unwrap_or(rest.len());
    let title = rest[title_offset..].trim_start();

    if !has_keyword {
        // Bare numbers need a capitalised title to count as a header.
        let first_alpha = title.chars().find(|c| c.is_alphabetic())?;
        if !first_alpha.is_uppercase() {
            return None;
        }
    }

    Some(title_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_keyword_headers() {
        let text = "SECTION 1: Identification\nProduct name: Hand Rub\nSECTION 2: Hazards identification\nH225 Highly flammable\n";
        let sections = segment(text);

        assert_eq!(sections.len(), 2);
        assert!(sections.body(1).starts_with("Identification"));
        assert!(sections.body(1).contains("Hand Rub"));
        assert!(sections.body(2).contains("H225"));
        assert_eq!(sections.body(3), "");
    }

    #[test]
    fn test_transport_does_not_swallow_other_information() {
        let text = "SECTION 14: Transport information\nUN number: UN1219\nClass: 3\nSection 16. Other information\nDate of issue: 13/04/2023\n";
        let sections = segment(text);

        assert!(sections.body(14).contains("UN1219"));
        assert!(!sections.body(14).contains("Section 16"));
        assert!(!sections.body(14).contains("Date of issue"));
        assert!(sections.body(16).starts_with("Other information"));
        assert!(sections.body(16).contains("13/04/2023"));
    }

    #[rstest]
    #[case("1. Identification\n", 1)]
    #[case("2 Hazards identification\n", 2)]
    #[case("14) Transport information\n", 14)]
    #[case("Section two - Hazards identification\n", 2)]
    #[case("SECTION Sixteen: Other information\n", 16)]
    #[case("  Section 8 Exposure controls\n", 8)]
    fn test_header_shapes(#[case] text: &str, #[case] expected: u8) {
        let sections = segment(text);
        assert_eq!(sections.numbers().collect::<Vec<_>>(), vec![expected]);
    }

    #[rstest]
    #[case("1.3 Details of the supplier of the safety data sheet\n")]
    #[case("13/04/2023 revision\n")]
    #[case("14-05-2022\n")]
    #[case("17. Appendix\n")]
    #[case("two Hazards\n")]
    #[case("3 of 5\n")]
    #[case("12\n")]
    #[case("2-Propanol 67-63-0 10-30%\n")]
    #[case("2-Butoxyethanol 111-76-2 1-5%\n")]
    fn test_rejected_headers(#[case] text: &str) {
        assert!(segment(text).is_empty(), "{text:?}");
    }

    #[test]
    fn test_subsections_stay_in_parent_body() {
        let text = "SECTION 1: Identification\n1.1 Product identifier\nHand Rub\n1.3 Details of the supplier\nAcme Chemicals Ltd\nSECTION 2: Hazards\n";
        let sections = segment(text);

        assert_eq!(sections.len(), 2);
        assert!(sections.body(1).contains("1.3 Details of the supplier"));
        assert!(sections.body(1).contains("Acme Chemicals Ltd"));
    }

    #[test]
    fn test_repeated_section_keeps_longest_body() {
        // A table of contents followed by the real sections.
        let text = "1. Identification\n2. Hazards identification\n\
                    SECTION 1: Identification\nProduct name: Hand Rub\nSupplier: Acme Chemicals Ltd\n\
                    SECTION 2: Hazards identification\nSignal word: Danger\n";
        let sections = segment(text);

        assert!(sections.body(1).contains("Acme Chemicals Ltd"));
        assert!(sections.body(2).contains("Danger"));
    }

    #[test]
    fn test_chemical_names_do_not_replace_sections() {
        let text = "2. Hazards identification\nNot classified as hazardous.\n\
                    3. Composition and information on ingredients\nIngredient CAS Proportion\n\
                    2-Propanol 67-63-0 10-30%\n2-Butoxyethanol 111-76-2 1-5%\nWater 7732-18-5 to 100%\n";
        let sections = segment(text);

        assert_eq!(sections.numbers().collect::<Vec<_>>(), vec![2, 3]);
        assert!(sections.body(2).contains("Not classified as hazardous."));
        assert!(!sections.body(2).contains("Butoxyethanol"));
        assert!(sections.body(3).contains("2-Propanol"));
        assert!(sections.body(3).contains("Water 7732-18-5"));
    }

    #[test]
    fn test_keyword_header_with_dash_is_kept() {
        let sections = segment("Section 2- Hazards identification\nH225 Highly flammable\n");
        assert!(sections.body(2).contains("H225"));
    }

    #[test]
    fn test_no_headers() {
        let sections = segment("Just a paragraph of text.\nAnother line.");
        assert!(sections.is_empty());
        assert_eq!(sections.body(1), "");
    }
}
