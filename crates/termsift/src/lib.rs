//! termsift: turn a search-terms report into a negative keyword list.
//!
//! termsift ingests a delimited search-terms export, finds the column that
//! holds the customer's query, splits each query into words, and collects the
//! phrases and words the user wants to exclude as deduplicated negative
//! keywords in exact, phrase or broad syntax.
//!
//! # Core Principles
//!
//! - **Best-effort ingestion**: malformed records are dropped, not fatal
//! - **One item per text**: negatives deduplicate on trimmed, lowercased text
//! - **Pure transitions**: every user event produces a new session state
//!
//! # Example
//!
//! ```
//! use termsift::{Action, Session};
//!
//! let mut session = Session::new();
//! session
//!     .ingest_upload("report.csv", b"Campaign,Search term\nBrand,cheap red shoes\n")
//!     .unwrap();
//!
//! session.dispatch(Action::AddFullPhrase { text: "cheap red shoes".into(), row_id: 1 });
//! session.dispatch(Action::ToggleWord { text: "cheap".into() });
//!
//! assert_eq!(session.negatives().clipboard_text(), "[cheap red shoes]\ncheap");
//! ```

pub mod detect;
pub mod error;
pub mod input;
pub mod negatives;
pub mod session;
pub mod tokenize;

pub use detect::{DEFAULT_PHRASE_COLUMN, Detection, DetectionMethod, PhraseColumnDetector, classify};
pub use error::{Result, TermsiftError};
pub use input::{Dataset, Parser, ParserConfig, Row, RowId, SourceMetadata, ingest};
pub use negatives::{
    FormatError, MatchType, NegativeId, NegativeItem, NegativeStore, format_negative,
};
pub use session::{Action, RowView, Session, SessionConfig, SessionSnapshot, SessionSummary, TokenView};
pub use tokenize::{token_key, tokenize};
