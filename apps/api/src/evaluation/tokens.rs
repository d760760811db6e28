use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Unicode word characters: letters, marks, digits and connector punctuation.
    static ref WORD_PATTERN: Regex = Regex::new(r"\w+").unwrap();
}

/// Splits text into lowercase word tokens.
///
/// Punctuation and whitespace separate tokens; digits and combining marks stay
/// inside them.
pub fn extract_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}
