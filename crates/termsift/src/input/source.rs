//! Ingested report data and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::detect::{DEFAULT_PHRASE_COLUMN, DetectionMethod, PhraseColumnDetector};
use crate::tokenize::token_key;

/// Stable 1-based row number assigned at ingestion.
pub type RowId = u64;

/// Metadata about an ingested report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file, when read from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Text encoding.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the report was ingested.
    pub ingested_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for an ingested report.
    pub fn new(
        file: impl Into<String>,
        path: Option<PathBuf>,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file: file.into(),
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            row_count,
            column_count,
            ingested_at: Utc::now(),
        }
    }
}

/// One record of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Stable 1-based sequence number.
    pub row_id: RowId,
    /// Raw cell values keyed by column name, in column order.
    pub fields: IndexMap<String, String>,
    /// Value of the phrase column (empty when missing).
    pub phrase: String,
}

impl Row {
    /// Get a cell by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }

    /// Trimmed, lowercased phrase used for equality with negative items.
    pub fn phrase_key(&self) -> String {
        token_key(&self.phrase)
    }
}

/// A parsed report: ordered columns and rows, plus the detected phrase column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique column names in file order.
    pub columns: Vec<String>,
    /// Rows in file order.
    pub rows: Vec<Row>,
    /// Column the phrases were taken from.
    pub phrase_column: String,
    /// How the phrase column was chosen.
    pub detection: DetectionMethod,
    /// The delimiter used.
    pub delimiter: u8,
}

impl Dataset {
    /// Build a dataset from header names and raw records.
    ///
    /// Row ids are assigned in record order starting at 1. Cells past the
    /// header width are dropped.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<String>>, delimiter: u8) -> Self {
        if columns.is_empty() {
            return Self {
                delimiter,
                ..Self::empty()
            };
        }

        let detection = PhraseColumnDetector::new().detect(&columns);

        let rows = records
            .into_iter()
            .zip(1..)
            .map(|(cells, row_id)| {
                let fields: IndexMap<String, String> =
                    columns.iter().cloned().zip(cells).collect();
                let phrase = fields
                    .get(&detection.column)
                    .cloned()
                    .unwrap_or_default();
                Row {
                    row_id,
                    fields,
                    phrase,
                }
            })
            .collect();

        Self {
            columns,
            rows,
            phrase_column: detection.column,
            detection: detection.method,
            delimiter,
        }
    }

    /// A report without columns: one synthetic phrase column and no rows.
    pub fn empty() -> Self {
        Self {
            columns: vec![DEFAULT_PHRASE_COLUMN.to_string()],
            rows: Vec::new(),
            phrase_column: DEFAULT_PHRASE_COLUMN.to_string(),
            detection: DetectionMethod::Default,
            delimiter: b',',
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a row by id.
    pub fn row(&self, row_id: RowId) -> Option<&Row> {
        // Ids are contiguous from 1, so try the direct index first.
        let direct = usize::try_from(row_id)
            .ok()
            .and_then(|id| id.checked_sub(1))
            .and_then(|idx| self.rows.get(idx))
            .filter(|row| row.row_id == row_id);
        direct.or_else(|| self.rows.iter().find(|row| row.row_id == row_id))
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}
