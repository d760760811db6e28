//! Required-section checklists: the fixed organizational policy list and
//! checklists mined from a reference document.
//!
//! # Numbered-heading grammar
//!
//! Reference text is scanned line by line. The first fragment of a line that
//! matches
//!
//! ```text
//! heading := number WS* label
//! number  := DIGITS ("." DIGITS)* "."?
//! label   := rest of the line, containing at least one non-whitespace char
//! ```
//!
//! becomes one entry (number and label, trimmed). A fragment may start at any
//! digit, including one inside a word, so `Section 2. Scope` yields
//! `2. Scope`, `1.Introduction` is kept whole and `COVID19 response plan`
//! yields `19 response plan`. Unnumbered headings are never detected, and
//! numbered list items or figures in prose are indistinguishable from real
//! headings.

use serde::Serialize;
use thiserror::Error;

/// The organizational checklist used by fixed-policy evaluations.
pub const STANDARD_SECTIONS: &[&str] = &[
    "Table of content",
    "Introduction",
    "Background",
    "Objective",
    // The legacy list had `"Methodology" or "Approach"`, which only ever kept
    // "Methodology". A single label keeps the section count at nine.
    "Methodology",
    "Project Team",
    "About Sahel",
    "Budget",
    "Work Plan",
];

/// User-facing caveat attached to every reference-derived checklist.
pub const EXTRACTION_NOTICE: &str = "Sections are derived from numbered headings only \
    (e.g. \"1. Introduction\", \"2.3 Budget\"). Unnumbered headings are not detected, and \
    numbered list items or figures inside body text are treated as headings.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("required section set is empty")]
    EmptySectionSet,

    #[error("required section label at position {position} is blank")]
    BlankLabel { position: usize },

    #[error("reference document contains no numbered headings")]
    NoNumberedHeadings,
}

/// Ordered, non-empty list of section labels, unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequiredSectionSet {
    labels: Vec<String>,
}

impl RequiredSectionSet {
    /// Builds a checklist from caller-supplied labels.
    ///
    /// Labels are trimmed; later labels equal to an earlier one ignoring case
    /// are dropped. Blank labels and empty input are rejected.
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for (position, label) in labels.into_iter().enumerate() {
            let label: String = label.into();
            let label = label.trim();
            if label.is_empty() {
                return Err(ConfigurationError::BlankLabel { position });
            }
            let folded = label.to_lowercase();
            if !unique.iter().any(|existing| existing.to_lowercase() == folded) {
                unique.push(label.to_string());
            }
        }
        if unique.is_empty() {
            return Err(ConfigurationError::EmptySectionSet);
        }
        Ok(Self { labels: unique })
    }

    /// The fixed organizational checklist.
    pub fn standard() -> Self {
        Self {
            labels: STANDARD_SECTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Mines a checklist from reference text.
    pub fn from_reference(text: &str) -> Result<Self, ConfigurationError> {
        let headings = extract_numbered_headings(text);
        if headings.is_empty() {
            return Err(ConfigurationError::NoNumberedHeadings);
        }
        Self::new(headings)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels().iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Returns every numbered heading in `text`, in order of first appearance,
/// deduplicated by exact string equality.
pub fn extract_numbered_headings(text: &str) -> Vec<String> {
    let mut headings: Vec<String> = Vec::new();
    for line in text.lines() {
        if let Some(heading) = match_numbered_heading(line) {
            if !headings.iter().any(|h| h == heading) {
                headings.push(heading.to_string());
            }
        }
    }
    headings
}

/// Finds the first numbered-heading fragment in a single line.
pub fn match_numbered_heading(line: &str) -> Option<&str> {
    line.char_indices()
        .filter(|(_, ch)| ch.is_ascii_digit())
        .find_map(|(idx, _)| {
            let fragment = &line[idx..];
            let number_len = scan_number(fragment)?;
            let label = fragment[number_len..].trim();
            (!label.is_empty()).then(|| fragment.trim())
        })
}

/// Length in bytes of the `number` production at the start of `s`.
fn scan_number(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = digits_end(bytes, 0)?;
    while bytes.get(pos) == Some(&b'.') {
        match digits_end(bytes, pos + 1) {
            Some(end) => pos = end,
            // trailing period closes the number
            None => return Some(pos + 1),
        }
    }
    Some(pos)
}

fn digits_end(bytes: &[u8], start: usize) -> Option<usize> {
    let len = bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (len > 0).then_some(start + len)
}
