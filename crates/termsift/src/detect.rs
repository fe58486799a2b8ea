//! Phrase column detection from report headers.
//!
//! Ads platforms export search-term reports with localized headers, so the
//! column holding the customer's query is found by name: first against a set
//! of known labels, then by keyword heuristics, and finally by position.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label used when a report has no columns at all.
pub const DEFAULT_PHRASE_COLUMN: &str = "Search term";

/// Known phrase column labels, already normalized.
static EXACT_LABELS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "search term",
        "search terms",
        "customer search term",
        "search query",
        "queries",
        // Russian
        "поисковый запрос",
        "поисковые запросы",
        "поисковый термин",
        "поисковые термины",
        "поисковая фраза",
        "поисковые фразы",
    ]
    .into_iter()
    .collect()
});

const CYRILLIC_SEARCH_ROOT: &str = "поиск";
const CYRILLIC_QUALIFIERS: &[&str] = &["запрос", "термин", "фраз"];

/// Which rule picked the phrase column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Header matched a known label.
    Exact,
    /// Header mentions "search" together with "term" or "query".
    EnglishHeuristic,
    /// Header mentions the Russian "search" root with a query/term/phrase root.
    CyrillicHeuristic,
    /// Nothing matched; the first column was used.
    FirstColumn,
    /// The report had no columns.
    Default,
}

impl DetectionMethod {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DetectionMethod::Exact => "exact label",
            DetectionMethod::EnglishHeuristic => "English heuristic",
            DetectionMethod::CyrillicHeuristic => "Cyrillic heuristic",
            DetectionMethod::FirstColumn => "first column fallback",
            DetectionMethod::Default => "default label",
        }
    }
}

/// Result of phrase column detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Original (un-normalized) column name.
    pub column: String,
    /// Rule that selected it.
    pub method: DetectionMethod,
}

/// Selects the phrase column of a report.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseColumnDetector;

impl PhraseColumnDetector {
    /// Create a new detector.
    pub fn new() -> Self {
        Self
    }

    /// Detect the phrase column among `columns`.
    ///
    /// Rules apply in strict priority order and the first column matching the
    /// highest rule wins. A column named "Keyword" is never matched by any
    /// heuristic and is only chosen when it happens to be first.
    pub fn detect<S: AsRef<str>>(&self, columns: &[S]) -> Detection {
        let Some(first) = columns.first() else {
            return Detection {
                column: DEFAULT_PHRASE_COLUMN.to_string(),
                method: DetectionMethod::Default,
            };
        };

        let normalized: Vec<(&str, String)> = columns
            .iter()
            .map(|c| (c.as_ref(), normalize_header(c.as_ref())))
            .collect();

        let rules: [(DetectionMethod, fn(&str) -> bool); 3] = [
            (DetectionMethod::Exact, |k| EXACT_LABELS.contains(k)),
            (DetectionMethod::EnglishHeuristic, is_english_phrase_header),
            (DetectionMethod::CyrillicHeuristic, is_cyrillic_phrase_header),
        ];

        for (method, matches) in rules {
            if let Some((original, _)) = normalized.iter().find(|(_, key)| matches(key)) {
                debug!(column = %original, method = method.label(), "Phrase column detected");
                return Detection {
                    column: (*original).to_string(),
                    method,
                };
            }
        }

        debug!(column = %first.as_ref(), "No phrase-like header, using first column");
        Detection {
            column: first.as_ref().to_string(),
            method: DetectionMethod::FirstColumn,
        }
    }
}

/// Return the name of the phrase column among `columns`.
pub fn classify<S: AsRef<str>>(columns: &[S]) -> String {
    PhraseColumnDetector::new().detect(columns).column
}

/// Strip a byte-order mark, trim and lowercase a header cell.
pub fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn is_english_phrase_header(key: &str) -> bool {
    key.contains("search") && (key.contains("term") || key.contains("query"))
}

fn is_cyrillic_phrase_header(key: &str) -> bool {
    key.contains(CYRILLIC_SEARCH_ROOT) && CYRILLIC_QUALIFIERS.iter().any(|q| key.contains(q))
}
