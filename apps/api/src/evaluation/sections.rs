//! Section presence matching.
//!
//! Matching is plain case-insensitive substring containment. Labels that
//! wrap across paragraphs are not found; that is the documented contract.

use serde::{Deserialize, Serialize};

use crate::evaluation::standards::RequiredSectionSet;
use crate::models::Document;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPresence {
    pub label: String,
    pub present: bool,
}

/// Present when some single paragraph contains the label.
pub fn match_by_paragraph(
    document: &Document,
    sections: &RequiredSectionSet,
) -> Vec<SectionPresence> {
    let paragraphs: Vec<String> = document
        .paragraphs
        .iter()
        .map(|p| p.text.to_lowercase())
        .collect();

    sections
        .iter()
        .map(|label| {
            let needle = label.to_lowercase();
            SectionPresence {
                label: label.to_string(),
                present: paragraphs.iter().any(|p| p.contains(&needle)),
            }
        })
        .collect()
}

/// Present when the whole flattened text contains the label.
pub fn match_in_text(text: &str, sections: &RequiredSectionSet) -> Vec<SectionPresence> {
    let haystack = text.to_lowercase();
    sections
        .iter()
        .map(|label| SectionPresence {
            label: label.to_string(),
            present: haystack.contains(&label.to_lowercase()),
        })
        .collect()
}

pub fn present_count(results: &[SectionPresence]) -> usize {
    results.iter().filter(|r| r.present).count()
}

pub fn missing_labels(results: &[SectionPresence]) -> Vec<&str> {
    results
        .iter()
        .filter(|r| !r.present)
        .map(|r| r.label.as_str())
        .collect()
}
