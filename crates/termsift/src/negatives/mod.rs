//! Negative keyword collection.
//!
//! A [`NegativeStore`] holds the deduplicated negative items collected from a
//! report together with the rows whose whole phrase was added. Every
//! operation returns a new store; nothing is updated in place.
//!
//! # Usage
//!
//! ```
//! use termsift::negatives::{MatchType, NegativeStore};
//!
//! let store = NegativeStore::new()
//!     .add("red shoes", MatchType::Exact, Some(1), true)
//!     .add("cheap", MatchType::Broad, None, false)
//!     .add("CHEAP ", MatchType::Broad, None, false);
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.clipboard_text(), "[red shoes]\ncheap");
//! ```

mod format;
mod item;
mod store;

pub use format::{FormatError, format_negative, format_with_mode};
pub use item::{MatchType, NegativeId, NegativeItem, dedup_key};
pub use store::NegativeStore;
