//! Splitting search phrases into word candidates.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// A word is a run of letters, combining marks or digits, optionally joined
/// by inner apostrophes or hyphens.
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}]+(?:['’\-][\p{L}\p{M}\p{N}]+)*").expect("word pattern is valid")
});

/// Split a phrase into its distinct words, in first-occurrence order.
///
/// Words that differ only by case are reported once, with the casing of
/// their first occurrence. Empty or whitespace-only phrases yield nothing.
pub fn tokenize(phrase: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WORD_PATTERN
        .find_iter(phrase)
        .map(|m| m.as_str())
        .filter(|word| seen.insert(token_key(word)))
        .map(str::to_string)
        .collect()
}

/// Identity of a token (or any negative text) for membership checks.
pub fn token_key(text: &str) -> String {
    text.trim().to_lowercase()
}
