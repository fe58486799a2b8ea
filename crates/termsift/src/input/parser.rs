//! Delimited report parser with delimiter detection.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::source::{Dataset, SourceMetadata};
use crate::error::{Result, TermsiftError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const BOM: char = '\u{feff}';

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses search-term reports.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut contents = Vec::new();
        File::open(path)
            .and_then(|mut file| file.read_to_end(&mut contents))
            .map_err(|e| TermsiftError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.parse_named(file, Some(path.to_path_buf()), &contents)
    }

    /// Parse an uploaded report that has a name but no path.
    pub fn parse_upload(
        &self,
        name: impl Into<String>,
        bytes: &[u8],
    ) -> Result<(Dataset, SourceMetadata)> {
        self.parse_named(name.into(), None, bytes)
    }

    fn parse_named(
        &self,
        file: String,
        path: Option<std::path::PathBuf>,
        bytes: &[u8],
    ) -> Result<(Dataset, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let dataset = self.parse_bytes(bytes)?;

        let metadata = SourceMetadata::new(
            file,
            path,
            hash,
            bytes.len() as u64,
            format_name(dataset.delimiter).to_string(),
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse raw bytes. The bytes must be UTF-8, optionally with a BOM.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let text = std::str::from_utf8(bytes)?;
        self.parse_str(text)
    }

    /// Parse report text.
    ///
    /// The first record is the header. Empty lines are skipped and records
    /// the CSV reader rejects are dropped rather than failing the whole report.
    pub fn parse_str(&self, text: &str) -> Result<Dataset> {
        let text = text.trim_start_matches(BOM);
        if text.trim().is_empty() {
            debug!("Report is empty, using default phrase column");
            return Ok(Dataset::empty());
        }

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let header = match records.next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => {
                return Err(TermsiftError::Parse {
                    row: 1,
                    message: format!("unreadable header: {}", e),
                });
            }
            None => return Ok(Dataset::empty()),
        };

        let columns = unique_headers(header.iter().map(normalize_header_cell));
        let width = columns.len();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (idx, result) in records.enumerate() {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }

            match result {
                Ok(record) => {
                    rows.push(record.iter().take(width).map(|s| s.to_string()).collect());
                }
                Err(e) => {
                    // Header is record 1.
                    warn!(record = idx + 2, error = %e, "Dropping malformed record");
                }
            }
        }

        debug!(
            columns = width,
            rows = rows.len(),
            delimiter = %(delimiter as char).escape_default(),
            "Parsed report"
        );

        Ok(Dataset::from_records(columns, rows, delimiter))
    }
}

/// Parse a report with the default configuration.
pub fn ingest(bytes: &[u8]) -> Result<Dataset> {
    Parser::new().parse_bytes(bytes)
}

/// Short format name for a delimiter.
pub fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

fn normalize_header_cell(cell: &str) -> String {
    cell.trim_start_matches(BOM).trim().to_string()
}

/// Make header names unique by suffixing repeats with `_1`, `_2`, ...
fn unique_headers(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Falls back to comma when no candidate appears at all.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let Some(&first_count) = counts.first() else {
            continue;
        };
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Tab gets a slight bonus as it rarely appears inside search terms.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
