//! Rendering negative items as ads-platform filter syntax.

use thiserror::Error;

use super::item::MatchType;

/// Error for match type names the formatter does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Unknown match type '{0}'. Use exact, phrase, or broad.")]
    UnknownMatchType(String),
}

/// Wrap `text` in the syntax of its match type.
///
/// Whitespace inside `text` is kept verbatim.
pub fn format_negative(text: &str, match_type: MatchType) -> String {
    match match_type {
        MatchType::Exact => format!("[{}]", text),
        MatchType::Phrase => format!("\"{}\"", text),
        MatchType::Broad => text.to_string(),
    }
}

/// Format with a match type given by name.
pub fn format_with_mode(text: &str, mode: &str) -> Result<String, FormatError> {
    let match_type: MatchType = mode.parse()?;
    Ok(format_negative(text, match_type))
}
