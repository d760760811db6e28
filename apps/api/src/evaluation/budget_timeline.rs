//! Content heuristics for reference-derived evaluations.
//!
//! Budget needs a keyword AND a money-like figure. Timeline needs a keyword
//! OR any date evidence. The two checks are independent of section matching.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const BUDGET_KEYWORDS: &[&str] = &[
    "budget",
    "cost",
    "expenditure",
    "financial plan",
    "funds",
    "cost breakdown",
];

pub const TIMELINE_KEYWORDS: &[&str] = &["timeline", "schedule", "work plan", "gantt chart"];

lazy_static! {
    /// `$1200`, `$5,000`, or comma-grouped thousands such as `12,500.75`.
    static ref MONEY_PATTERN: Regex =
        Regex::new(r"\$\d+|\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\b").unwrap();

    /// Month abbreviations or full names as whole words. Matches the verb
    /// "may" as well; accepted as part of the heuristic.
    static ref MONTH_PATTERN: Regex = Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b"
    )
    .unwrap();

    /// Any whole-word run of four digits.
    static ref YEAR_PATTERN: Regex = Regex::new(r"\b\d{4}\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChecks {
    pub budget_ok: bool,
    pub timeline_ok: bool,
}

pub fn audit_content(text: &str) -> ContentChecks {
    ContentChecks {
        budget_ok: check_budget(text),
        timeline_ok: check_timeline(text),
    }
}

pub fn check_budget(text: &str) -> bool {
    let lower = text.to_lowercase();
    let has_keyword = BUDGET_KEYWORDS.iter().any(|k| lower.contains(k));
    has_keyword && MONEY_PATTERN.is_match(text)
}

pub fn check_timeline(text: &str) -> bool {
    let lower = text.to_lowercase();
    TIMELINE_KEYWORDS.iter().any(|k| lower.contains(k))
        || MONTH_PATTERN.is_match(text)
        || YEAR_PATTERN.is_match(text)
}
