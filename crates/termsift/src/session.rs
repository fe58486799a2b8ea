//! Session state: the current report and the negatives collected from it.
//!
//! All user events are [`Action`]s. [`Session::apply`] turns the current
//! session and one action into the next session, so every event is one
//! complete, synchronous transition.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::detect::DetectionMethod;
use crate::error::Result;
use crate::input::{Dataset, Parser, ParserConfig, RowId, SourceMetadata};
use crate::negatives::{MatchType, NegativeId, NegativeItem, NegativeStore};
use crate::tokenize::{token_key, tokenize};

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Match type for whole phrases added from a row.
    pub full_phrase_match: MatchType,
    /// Match type for single words toggled on.
    pub word_match: MatchType,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            full_phrase_match: MatchType::Exact,
            word_match: MatchType::Broad,
        }
    }
}

/// One user event.
#[derive(Debug, Clone)]
pub enum Action {
    /// A new report replaces the current one; negatives and marks are cleared.
    ReportLoaded {
        dataset: Dataset,
        source: Option<SourceMetadata>,
    },
    /// Add a row's whole phrase and mark the row.
    AddFullPhrase { text: String, row_id: RowId },
    /// Remove a row's whole phrase and unmark the row.
    RemoveFullPhrase { text: String, row_id: RowId },
    /// Add a single word, or remove it when it is already a negative.
    ToggleWord { text: String },
    /// Add a negative with an explicit match type.
    AddNegative {
        text: String,
        match_type: MatchType,
        row_id: Option<RowId>,
        mark_row: bool,
    },
    /// Remove a negative by its text.
    RemoveByText {
        text: String,
        row_id: Option<RowId>,
        unmark_row: bool,
    },
    /// Remove a negative by id, unmarking rows whose phrase it matched.
    RemoveById { id: NegativeId },
    /// Change a negative's match type.
    UpdateMatchType { id: NegativeId, match_type: MatchType },
}

/// The session-scoped state container.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SessionConfig,
    dataset: Arc<Dataset>,
    source: Option<SourceMetadata>,
    negatives: NegativeStore,
}

impl Session {
    /// Create a session with default configuration and no report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The current report.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Metadata of the current report, if one was ingested.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    /// The negative collection.
    pub fn negatives(&self) -> &NegativeStore {
        &self.negatives
    }

    /// Compute the session that results from `action`.
    pub fn apply(&self, action: Action) -> Session {
        let store = &self.negatives;
        let negatives = match action {
            Action::ReportLoaded { dataset, source } => {
                return Session {
                    config: self.config.clone(),
                    dataset: Arc::new(dataset),
                    source,
                    negatives: self.negatives.cleared(),
                };
            }
            Action::AddFullPhrase { text, row_id } => {
                store.add(&text, self.config.full_phrase_match, Some(row_id), true)
            }
            Action::RemoveFullPhrase { text, row_id } => {
                store.remove_by_text(&text, Some(row_id), true)
            }
            Action::ToggleWord { text } => {
                if store.contains(&text) {
                    store.remove_by_text(&text, None, false)
                } else {
                    store.add(&text, self.config.word_match, None, false)
                }
            }
            Action::AddNegative {
                text,
                match_type,
                row_id,
                mark_row,
            } => store.add(&text, match_type, row_id, mark_row),
            Action::RemoveByText {
                text,
                row_id,
                unmark_row,
            } => store.remove_by_text(&text, row_id, unmark_row),
            Action::RemoveById { id } => store.remove_by_id(&id, &self.dataset.rows),
            Action::UpdateMatchType { id, match_type } => {
                store.update_match_type(&id, match_type)
            }
        };

        Session {
            config: self.config.clone(),
            dataset: Arc::clone(&self.dataset),
            source: self.source.clone(),
            negatives,
        }
    }

    /// Apply `action` to this session.
    pub fn dispatch(&mut self, action: Action) {
        *self = self.apply(action);
    }

    /// Ingest a report file. On error the session is left untouched.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let parser = Parser::with_config(self.config.parser.clone());
        let (dataset, source) = parser.parse_file(path)?;
        self.load(dataset, source);
        Ok(())
    }

    /// Ingest uploaded bytes. On error the session is left untouched.
    pub fn ingest_upload(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<()> {
        let parser = Parser::with_config(self.config.parser.clone());
        let (dataset, source) = parser.parse_upload(name, bytes)?;
        self.load(dataset, source);
        Ok(())
    }

    fn load(&mut self, dataset: Dataset, source: SourceMetadata) {
        info!(
            file = %source.file,
            rows = dataset.row_count(),
            phrase_column = %dataset.phrase_column,
            "Report loaded"
        );
        self.dispatch(Action::ReportLoaded {
            dataset,
            source: Some(source),
        });
    }

    /// Rows of the current report with tokens and mark state.
    pub fn rows_view(&self) -> Vec<RowView> {
        let index = self.negatives.membership_index();
        let marked = self.negatives.effective_marked_rows(&self.dataset.rows);

        self.dataset
            .rows
            .iter()
            .map(|row| {
                let tokens = tokenize(&row.phrase)
                    .into_iter()
                    .map(|text| {
                        let in_list = index.contains_key(&token_key(&text));
                        TokenView { text, in_list }
                    })
                    .collect();
                RowView {
                    row_id: row.row_id,
                    phrase: row.phrase.clone(),
                    fields: row.fields.clone(),
                    tokens,
                    phrase_in_list: index.contains_key(&row.phrase_key()),
                    marked: marked.contains(&row.row_id),
                }
            })
            .collect()
    }

    /// Ids of rows that show as marked.
    pub fn marked_rows(&self) -> BTreeSet<RowId> {
        self.negatives.effective_marked_rows(&self.dataset.rows)
    }

    /// Whether a row shows as marked.
    pub fn is_row_marked(&self, row_id: RowId) -> bool {
        self.dataset
            .row(row_id)
            .map(|row| self.negatives.is_row_marked(row_id, &row.phrase))
            .unwrap_or_else(|| self.negatives.marked_rows().contains(&row_id))
    }

    /// Summary of the session.
    pub fn summary(&self) -> SessionSummary {
        let mut by_match_type = IndexMap::new();
        for match_type in MatchType::ALL {
            let count = self
                .negatives
                .items()
                .iter()
                .filter(|item| item.match_type == match_type)
                .count();
            by_match_type.insert(match_type, count);
        }

        SessionSummary {
            file: self.source.as_ref().map(|s| s.file.clone()),
            phrase_column: self.dataset.phrase_column.clone(),
            detection: self.dataset.detection,
            row_count: self.dataset.row_count(),
            column_count: self.dataset.column_count(),
            total_negatives: self.negatives.len(),
            negatives_by_match_type: by_match_type,
            marked_row_count: self.marked_rows().len(),
        }
    }

    /// Everything a negatives panel needs to render.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            summary: self.summary(),
            columns: self.dataset.columns.clone(),
            negatives: self.negatives.items().to_vec(),
            formatted_lines: self.negatives.formatted_lines(),
            marked_rows: self.marked_rows(),
        }
    }
}

/// A word of a row's phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenView {
    /// The word as displayed.
    pub text: String,
    /// Whether the word is already a negative.
    pub in_list: bool,
}

/// A report row prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub row_id: RowId,
    pub phrase: String,
    pub fields: IndexMap<String, String>,
    pub tokens: Vec<TokenView>,
    /// Whether the whole phrase is a negative.
    pub phrase_in_list: bool,
    /// Whether the row shows as marked.
    pub marked: bool,
}

/// Counts describing a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Name of the ingested file.
    pub file: Option<String>,
    /// Column the phrases come from.
    pub phrase_column: String,
    /// How the phrase column was chosen.
    pub detection: DetectionMethod,
    pub row_count: usize,
    pub column_count: usize,
    pub total_negatives: usize,
    pub negatives_by_match_type: IndexMap<MatchType, usize>,
    /// Rows that show as marked.
    pub marked_row_count: usize,
}

/// Read-only projection of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub summary: SessionSummary,
    pub columns: Vec<String>,
    pub negatives: Vec<NegativeItem>,
    pub formatted_lines: Vec<String>,
    pub marked_rows: BTreeSet<RowId>,
}
