//! Negative items and match types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::format::FormatError;
use crate::tokenize::token_key;

/// How a negative keyword matches search queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Blocks the exact query only. Rendered as `[text]`.
    Exact,
    /// Blocks queries containing the phrase. Rendered as `"text"`.
    #[default]
    Phrase,
    /// Blocks queries containing all the words. Rendered as `text`.
    Broad,
}

impl MatchType {
    /// All match types, in display order.
    pub const ALL: [MatchType; 3] = [MatchType::Exact, MatchType::Phrase, MatchType::Broad];

    /// Lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Phrase => "phrase",
            MatchType::Broad => "broad",
        }
    }
}

impl FromStr for MatchType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(MatchType::Exact),
            "phrase" => Ok(MatchType::Phrase),
            "broad" => Ok(MatchType::Broad),
            _ => Err(FormatError::UnknownMatchType(s.to_string())),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identity of a negative item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NegativeId(String);

impl NegativeId {
    pub(crate) fn from_sequence(n: u64) -> Self {
        Self(format!("neg_{:03}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NegativeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NegativeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NegativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A term or phrase to exclude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeItem {
    /// Stable identity, kept across match type updates.
    pub id: NegativeId,
    /// Trimmed text with its original casing.
    pub text: String,
    /// How the item matches.
    pub match_type: MatchType,
}

impl NegativeItem {
    /// Deduplication key of this item.
    pub fn key(&self) -> String {
        dedup_key(&self.text)
    }

    /// Render this item as filter syntax.
    pub fn formatted(&self) -> String {
        super::format_negative(&self.text, self.match_type)
    }
}

/// Trimmed, lowercased form of a text; two items with equal keys are duplicates.
///
/// Inner whitespace is kept as is, so `"red  shoes"` and `"red shoes"` differ.
pub fn dedup_key(text: &str) -> String {
    token_key(text)
}
