//! The compiled pattern table.
//!
//! Built once on first use and shared read-only by every parse, including
//! parses running concurrently on other threads.

use once_cell::sync::Lazy;
use regex::Regex;

/// A date-shaped token: ISO, D/M/Y with `/`, `.` or `-`, `D Month YYYY`,
/// or `Month D, YYYY`.
pub const DATE_TOKEN: &str = r"(?:\d{4}-\d{2}-\d{2}|\d{1,2}[/.\-]\d{1,2}[/.\-](?:\d{4}|\d{2})|\d{1,2}(?:st|nd|rd|th)?[ \t]+MONTH\.?,?[ \t]+\d{4}|MONTH\.?[ \t]+\d{1,2}(?:st|nd|rd|th)?,?[ \t]+\d{4})";

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Issue-date labels, highest priority first.
pub const ISSUE_DATE_LABELS: [(&str, &str); 5] = [
    ("date of issue", r"date\s+of\s+(?:last\s+)?issue"),
    ("revision date", r"revision\s*date|date\s+of\s+(?:last\s+)?revision"),
    ("issue date", r"issue\s*date"),
    ("issued", r"issued(?:\s+on)?"),
    ("date prepared", r"date\s+prepared|preparation\s+date"),
];

/// How far past a label the window fallback looks for a date.
pub const DATE_WINDOW_CHARS: usize = 80;

pub struct PatternTable {
    // Identification (section 1)
    pub product_label: Regex,
    pub product_use_label: Regex,
    pub bare_use_label: Regex,
    pub boilerplate_title: Regex,

    // Vendor
    pub prepared_by: Regex,
    pub vendor_label_line: Regex,
    pub supplier_details_line: Regex,
    pub contact_tokens: Regex,
    pub vendor_trailing_noise: Regex,
    pub digit_run: Regex,

    // Dates
    pub date_token: Regex,
    pub date_labels: Vec<(&'static str, Regex)>,
    pub date_window: Regex,

    // Hazards (section 2)
    pub hazard_none: Regex,
    pub hazard_keyword: Regex,
    pub hazard_code: Regex,
    pub precaution_code: Regex,
    pub any_statement_code: Regex,
    pub signal_word: Regex,

    // Transport (section 14)
    pub dg_none: Regex,
    pub un_number: Regex,
    pub dg_class: Regex,
    pub packing_group: Regex,
    pub subsidiary_risks: Regex,
    pub shipping_name_label: Regex,
    pub shipping_table_header: Regex,
    pub shipping_name_keyword: Regex,
    pub leading_un_number: Regex,

    // Composition
    pub cas_number: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern:?}: {e}"))
}

fn with_dates(pattern: &str) -> String {
    pattern.replace("DATE", &date_token())
}

fn date_token() -> String {
    DATE_TOKEN.replace("MONTH", MONTH)
}

pub static PATTERNS: Lazy<PatternTable> = Lazy::new(|| {
    let date_labels = ISSUE_DATE_LABELS
        .iter()
        .map(|(name, label)| {
            let pattern = with_dates(&format!(r"(?i)\b(?:{label})\b\s*[:\-]?\s*\b(DATE)\b"));
            (*name, compile(&pattern))
        })
        .collect();

    let any_label = ISSUE_DATE_LABELS
        .iter()
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join("|");

    PatternTable {
        product_label: compile(r"(?i)\b(?:product\s*(?:name|identifier)|trade\s*name)\b[ \t]*[:\-]?[ \t]*"),
        product_use_label: compile(
            r"(?i)\b(?:(?:recommended|product|intended|identified)\s+uses?|use\s+of\s+the\s+(?:substance|product|mixture)(?:\s*/\s*mixture)?)\b[ \t]*[:\-]?[ \t]*",
        ),
        bare_use_label: compile(r"(?im)^[ \t]*uses?[ \t]*(?::[ \t]*|$)"),
        boilerplate_title: compile(
            r"(?i)safety\s+data\s+sheet|material\s+safety|\b(?:m?sds|revision|version|identification|section|undertaking)\b|page\s+\d",
        ),

        prepared_by: compile(r"(?i)(?:\bSDS\s+)?\b(?:prepared|issued)\s+by\b[ \t]*[:\-]?[ \t]*([^,\n]+)"),
        vendor_label_line: compile(
            r"(?i)^(?:supplier|manufacturer|company|distributor|importer)(?:\s*/\s*(?:supplier|manufacturer|company|distributor|importer))*\b(?:\s+(?:name|details))?\s*[:\-]?\s*(.*)$",
        ),
        supplier_details_line: compile(r"(?i)^(?:1\.3\.?\s*)?details\s+of\s+the\s+supplier"),
        contact_tokens: compile(
            r"(?i)\b(?:address|street|road|drive|avenue|tel|telephone|phone|fax|e-?mail|website|www|https?|emergency)\b|\b(?:st|rd|ave)\.|\bp\.?\s?o\.?\s+box\b|@",
        ),
        vendor_trailing_noise: compile(r"(?i)\s+(?:(?:date|revision|version|issued?)\b|on\s+\d).*$"),
        digit_run: compile(r"\d{2,}"),

        date_token: compile(&format!(r"(?i)\b{}\b", date_token())),
        date_labels,
        date_window: compile(&with_dates(&format!(
            r"(?is)\b(?:{any_label})\b.{{0,{DATE_WINDOW_CHARS}}}?\b(DATE)\b"
        ))),

        hazard_none: compile(
            r"(?i)not\s+classified\s+as\s+(?:a\s+)?hazardous|non[-\s]?hazardous|does\s+not\s+meet\s+the\s+criteria|not\s+a\s+hazardous\s+(?:substance|chemical|mixture)|no\s+classification\s+required",
        ),
        hazard_keyword: compile(r"(?i)\bhazard(?:ous|s)\b"),
        hazard_code: compile(r"\b([Hh]\d{3}[A-Za-z]{0,2}(?:\s*\+\s*[Hh]\d{3}[A-Za-z]{0,2})*)\b"),
        precaution_code: compile(r"\b([Pp]\d{3}(?:\s*\+\s*[Pp]\d{3})*)\b"),
        any_statement_code: compile(r"\b[HhPp]\d{3}"),
        signal_word: compile(r"(?i)\bsignal\s+words?\b\s*[:\-]?\s*\b(danger|warning)\b"),

        dg_none: compile(
            r"(?i)not\s+(?:subject|regulated|restricted)|not\s+classified\s+as\s+(?:a\s+)?dangerous\s+goods?|not\s+(?:a\s+)?dangerous\s+goods?",
        ),
        un_number: compile(r"(?i)\bUN(?:/NA|/ID)?[\s\-]*(?:No\.?|Number|#)?\s*[:\-]?\s*(\d{4})\b"),
        dg_class: compile(r"(?i)\bclass(?:\(es\)|es)?\s*[:\-]?\s*(\d(?:\.\d)?)\b"),
        packing_group: compile(r"(?i)(?:\bpacking\s*group|(?-i:\bPG\b)|\bP\.G\.)\s*[:\-]?\s*(III|II|I|[1-3])\b"),
        subsidiary_risks: compile(
            r"(?i)\b(?:subsidiary\s*(?:risks?|hazards?)|sub[\s\-]*risks?)(?:\(s\))?[ \t]*[:\-]?[ \t]*([A-Za-z0-9 ,/.\-]+)",
        ),
        shipping_name_label: compile(r"(?i)\b(?:UN\s+)?proper\s+shipping\s+name\b[ \t]*[:\-]?[ \t]*|(?-i:\bPSN\b)[ \t]*[:\-]?[ \t]*"),
        shipping_table_header: compile(r"(?i)\bclass\b|packing\s+group|\bUN\s+(?:no|number)\b"),
        shipping_name_keyword: compile(r"(?i)\bN\.?O\.?S\b|\balcohols?\b"),
        leading_un_number: compile(r"(?i)^.*?\bUN\s*\d{4}\b[\s,:\-]*"),

        cas_number: compile(r"\b(\d{2,7}-\d{2}-\d)\b"),
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_compiles() {
        Lazy::force(&PATTERNS);
        assert_eq!(PATTERNS.date_labels.len(), ISSUE_DATE_LABELS.len());
    }

    #[test]
    fn test_date_token_shapes() {
        for token in ["2023-04-13", "13/04/2023", "13.04.23", "13 April 2023", "April 13, 2023", "5th Sept 2022"] {
            let found = PATTERNS.date_token.find(token).map(|m| m.as_str());
            assert_eq!(found, Some(token), "{token}");
        }
        assert!(PATTERNS.date_token.find("1234/56").is_none());
    }

    #[test]
    fn test_cas_shape() {
        let found: Vec<_> = PATTERNS
            .cas_number
            .find_iter("Isopropanol 67-63-0, water 7732-18-5, dated 2023-04-13")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["67-63-0", "7732-18-5"]);
    }
}
