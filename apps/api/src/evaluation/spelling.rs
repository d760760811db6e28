//! Spell-check service and the spelling audit built on it.
//!
//! The audit penalizes every distinct unknown token but only reports the
//! first `MAX_REPORTED_MISSPELLINGS` of them, sorted, so output is stable.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::evaluation::tokens::extract_words;

pub const MAX_REPORTED_MISSPELLINGS: usize = 15;

/// Classifies tokens as known or unknown. Output order carries no meaning.
pub trait SpellChecker: Send + Sync {
    fn unknown_tokens(&self, words: &[String]) -> HashSet<String>;

    /// Short backend name, surfaced in logs.
    fn backend(&self) -> &'static str;

    /// False for backends that accept every token without looking it up.
    fn checks_spelling(&self) -> bool {
        true
    }
}

/// Word-list backed checker. Expects lowercase tokens.
pub struct DictionarySpellChecker {
    words: HashSet<String>,
    longest_word: usize,
}

impl DictionarySpellChecker {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let longest_word = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        Self {
            words,
            longest_word,
        }
    }

    /// Loads a newline-delimited word list.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary at '{}'", path.display()))?;
        let checker = Self::from_words(raw.lines());
        info!(
            "Loaded {} dictionary words from {}",
            checker.word_count(),
            path.display()
        );
        Ok(checker)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Numbers, lone punctuation and implausibly long tokens are not judged.
    fn should_check(&self, word: &str) -> bool {
        let char_count = word.chars().count();
        if char_count == 1 && word.chars().all(|c| c.is_ascii_punctuation()) {
            return false;
        }
        if char_count > self.longest_word + 3 {
            return false;
        }
        if word == "nan" || word.parse::<f64>().is_ok() {
            return false;
        }
        true
    }
}

impl SpellChecker for DictionarySpellChecker {
    fn unknown_tokens(&self, words: &[String]) -> HashSet<String> {
        words
            .iter()
            .filter(|w| self.should_check(w) && !self.words.contains(w.as_str()))
            .cloned()
            .collect()
    }

    fn backend(&self) -> &'static str {
        "dictionary"
    }
}

/// Accepts every token. Used when no dictionary is configured.
pub struct PermissiveSpellChecker;

impl SpellChecker for PermissiveSpellChecker {
    fn unknown_tokens(&self, _words: &[String]) -> HashSet<String> {
        HashSet::new()
    }

    fn backend(&self) -> &'static str {
        "permissive"
    }

    fn checks_spelling(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingAudit {
    /// Distinct unknown tokens, sorted, at most `MAX_REPORTED_MISSPELLINGS`.
    pub misspelled: Vec<String>,
    /// Distinct unknown tokens before the display cap; drives the penalty.
    pub unknown_count: usize,
    /// False when the backend never judged a token.
    pub checked: bool,
}

pub fn audit_spelling(text: &str, checker: &dyn SpellChecker) -> SpellingAudit {
    let words = extract_words(text);
    let unknown = checker.unknown_tokens(&words);
    let unknown_count = unknown.len();

    let mut misspelled: Vec<String> = unknown.into_iter().collect();
    misspelled.sort();
    misspelled.truncate(MAX_REPORTED_MISSPELLINGS);

    SpellingAudit {
        misspelled,
        unknown_count,
        checked: checker.checks_spelling(),
    }
}
