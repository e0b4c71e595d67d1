//! Date normalisation and the issue-date resolver.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::patterns::PATTERNS;

/// Tried in order, first success wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateFormat {
    Iso,
    DayMonthYear,
    DayMonthShortYear,
    MonthDayYear,
    MonthDayShortYear,
    DayMonthName,
    MonthNameDay,
}

const FORMATS: [DateFormat; 7] = [
    DateFormat::Iso,
    DateFormat::DayMonthYear,
    DateFormat::DayMonthShortYear,
    DateFormat::MonthDayYear,
    DateFormat::MonthDayShortYear,
    DateFormat::DayMonthName,
    DateFormat::MonthNameDay,
];

static ISO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})$").unwrap());
static DAY_MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]{3,9})\.?,?\s+(\d{4})$").unwrap()
});
static MONTH_NAME_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})$").unwrap()
});

impl DateFormat {
    fn parse(self, raw: &str) -> Option<NaiveDate> {
        match self {
            DateFormat::Iso => {
                let caps = ISO.captures(raw)?;
                ymd(num(&caps, 1)?, num(&caps, 2)?, num(&caps, 3)?)
            }
            DateFormat::DayMonthYear | DateFormat::DayMonthShortYear => {
                let caps = NUMERIC.captures(raw)?;
                let year = self.year(&caps[3])?;
                ymd(year, num(&caps, 2)?, num(&caps, 1)?)
            }
            DateFormat::MonthDayYear | DateFormat::MonthDayShortYear => {
                let caps = NUMERIC.captures(raw)?;
                let year = self.year(&caps[3])?;
                ymd(year, num(&caps, 1)?, num(&caps, 2)?)
            }
            DateFormat::DayMonthName => {
                let caps = DAY_MONTH_NAME.captures(raw)?;
                ymd(num(&caps, 3)?, month_number(&caps[2])?, num(&caps, 1)?)
            }
            DateFormat::MonthNameDay => {
                let caps = MONTH_NAME_DAY.captures(raw)?;
                ymd(num(&caps, 3)?, month_number(&caps[1])?, num(&caps, 2)?)
            }
        }
    }

    // Four-digit formats take only four-digit years and vice versa.
    fn year(self, digits: &str) -> Option<i32> {
        let short = matches!(
            self,
            DateFormat::DayMonthShortYear | DateFormat::MonthDayShortYear
        );
        match (short, digits.len()) {
            (false, 4) => digits.parse().ok(),
            (true, 2) => digits.parse().ok().map(expand_two_digit_year),
            _ => None,
        }
    }
}

fn num<T: std::str::FromStr>(caps: &Captures, idx: usize) -> Option<T> {
    caps.get(idx)?.as_str().parse().ok()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `69..=99` are 1900s, `00..=68` are 2000s.
pub fn expand_two_digit_year(year: i32) -> i32 {
    if year >= 69 {
        1900 + year
    } else {
        2000 + year
    }
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_ascii_lowercase();
    let prefix = lower.get(..3)?;
    let idx = MONTHS.iter().position(|m| *m == prefix)?;
    // Reject words that merely start like a month ("market", "junk").
    let full = [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ][idx];
    full.starts_with(&lower).then_some(idx as u32 + 1)
}

/// Parse a date token into a date, trying the known formats in order.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    FORMATS.iter().find_map(|format| format.parse(raw))
}

/// Render a date token as `YYYY-MM-DD`, or hand back the trimmed input when
/// no format fits.
pub fn normalize_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.trim().to_string(),
    }
}

/// Resolves the document's issue date against a reference "today".
#[derive(Debug, Clone, Copy)]
pub struct IssueDateResolver {
    today: NaiveDate,
    max_future_days: i64,
}

impl IssueDateResolver {
    pub fn new(today: NaiveDate, max_future_days: i64) -> Self {
        Self {
            today,
            max_future_days,
        }
    }

    /// Latest acceptable date. Anything later is treated as a misread.
    pub fn latest_plausible(&self) -> NaiveDate {
        self.today + Duration::days(self.max_future_days)
    }

    // Unparsed candidates are accepted as-is; they cannot be bounds-checked.
    fn is_plausible(&self, normalized: &str) -> bool {
        match NaiveDate::parse_from_str(normalized, "%Y-%m-%d") {
            Ok(date) => date <= self.latest_plausible(),
            Err(_) => true,
        }
    }

    /// Search order:
    /// 1. each label by priority, section 16 before the full text
    /// 2. a date within a short window after any label
    /// 3. the first unlabeled date in section 16
    pub fn resolve(&self, section_16: &str, full_text: &str) -> Option<String> {
        let mut rejected = HashSet::new();

        for (label, pattern) in &PATTERNS.date_labels {
            for scope in [section_16, full_text] {
                for caps in pattern.captures_iter(scope) {
                    let raw = &caps[1];
                    if let Some(date) = self.accept(raw, &mut rejected) {
                        debug!("issue date {} from label {:?}", date, label);
                        return Some(date);
                    }
                }
            }
        }

        for scope in [section_16, full_text] {
            let mut start = 0;
            while let Some(caps) = PATTERNS.date_window.captures_at(scope, start) {
                let Some(label) = caps.get(0) else { break };
                if issued_by(scope, label.start()) {
                    // A real label may sit between "Issued by" and its date.
                    start = next_char_boundary(scope, label.start());
                    continue;
                }
                if let Some(date) = self.accept(&caps[1], &mut rejected) {
                    debug!("issue date {} from label window", date);
                    return Some(date);
                }
                start = label.end();
            }
        }

        // Last resort, returned whatever it says about the future.
        PATTERNS
            .date_token
            .find_iter(section_16)
            .map(|m| m.as_str())
            .find(|raw| !rejected.contains(*raw))
            .map(normalize_date)
    }

    fn accept(&self, raw: &str, rejected: &mut HashSet<String>) -> Option<String> {
        let normalized = normalize_date(raw);
        if self.is_plausible(&normalized) {
            Some(normalized)
        } else {
            debug!("rejecting {} as too far in the future", normalized);
            rejected.insert(raw.to_string());
            None
        }
    }
}

// The window pattern cannot exclude "Issued by" itself.
fn issued_by(scope: &str, label_start: usize) -> bool {
    let tail: String = scope[label_start..].chars().take(16).collect();
    let tail = tail.to_ascii_lowercase();
    let Some(rest) = tail.strip_prefix("issued") else {
        return false;
    };
    rest.trim_start().starts_with("by")
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(text.len())
}
