//! Deduplicated negative items and row marks.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use super::item::{MatchType, NegativeId, NegativeItem, dedup_key};
use crate::input::{Row, RowId};

/// Negative items in insertion order plus the rows explicitly marked as
/// fully added.
///
/// At most one item exists per [`dedup_key`]. Rows whose phrase equals an
/// item's text count as marked too, but that is derived on read by
/// [`NegativeStore::is_row_marked`] and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NegativeStore {
    items: Vec<NegativeItem>,
    marked_rows: BTreeSet<RowId>,
    #[serde(skip)]
    last_id: u64,
}

impl NegativeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that keeps counting ids where this one left off, so
    /// ids handed out before a reload never refer to a new item.
    pub fn cleared(&self) -> Self {
        Self {
            last_id: self.last_id,
            ..Self::default()
        }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[NegativeItem] {
        &self.items
    }

    /// Rows explicitly marked by whole-phrase adds.
    pub fn marked_rows(&self) -> &BTreeSet<RowId> {
        &self.marked_rows
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by id.
    pub fn get(&self, id: &NegativeId) -> Option<&NegativeItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Get the item whose dedup key matches `text`.
    pub fn find_by_text(&self, text: &str) -> Option<&NegativeItem> {
        let key = dedup_key(text);
        if key.is_empty() {
            return None;
        }
        self.items.iter().find(|item| item.key() == key)
    }

    /// Add a negative item.
    ///
    /// Blank text leaves the store unchanged. When an item with the same key
    /// already exists, it is kept as is (text, casing and match type) and only
    /// the row mark is applied.
    pub fn add(
        &self,
        text: &str,
        match_type: MatchType,
        row_id: Option<RowId>,
        mark_row: bool,
    ) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return self.clone();
        }

        let mut next = self.clone();
        if mark_row {
            if let Some(row_id) = row_id {
                next.marked_rows.insert(row_id);
            }
        }

        if self.find_by_text(text).is_some() {
            debug!(text, "Negative already present");
            return next;
        }

        next.last_id += 1;
        let item = NegativeItem {
            id: NegativeId::from_sequence(next.last_id),
            text: text.to_string(),
            match_type,
        };
        debug!(id = %item.id, text, match_type = %match_type, "Added negative");
        next.items.push(item);
        next
    }

    /// Remove the item whose key matches `text`, optionally unmarking a row.
    pub fn remove_by_text(&self, text: &str, row_id: Option<RowId>, unmark_row: bool) -> Self {
        let key = dedup_key(text);
        if key.is_empty() {
            return self.clone();
        }

        let mut next = self.clone();
        next.items.retain(|item| item.key() != key);
        if unmark_row {
            if let Some(row_id) = row_id {
                next.marked_rows.remove(&row_id);
            }
        }

        debug!(
            key = %key,
            removed = self.items.len() - next.items.len(),
            "Removed negative by text"
        );
        next
    }

    /// Remove the item with `id`.
    ///
    /// Every row in `rows` whose phrase matches the removed item's key is
    /// unmarked as well. Unknown ids leave the store unchanged.
    pub fn remove_by_id(&self, id: &NegativeId, rows: &[Row]) -> Self {
        let Some(removed) = self.get(id) else {
            return self.clone();
        };
        let key = removed.key();

        let mut next = self.clone();
        next.items.retain(|item| &item.id != id);
        for row in rows.iter().filter(|row| row.phrase_key() == key) {
            next.marked_rows.remove(&row.row_id);
        }

        debug!(id = %id, "Removed negative");
        next
    }

    /// Change the match type of the item with `id`.
    pub fn update_match_type(&self, id: &NegativeId, match_type: MatchType) -> Self {
        let mut next = self.clone();
        if let Some(item) = next.items.iter_mut().find(|item| &item.id == id) {
            item.match_type = match_type;
            debug!(id = %id, match_type = %match_type, "Updated match type");
        }
        next
    }

    /// Dedup key → item, for "is this text already a negative" lookups.
    pub fn membership_index(&self) -> HashMap<String, &NegativeItem> {
        self.items.iter().map(|item| (item.key(), item)).collect()
    }

    /// Whether `text` is already a negative.
    pub fn contains(&self, text: &str) -> bool {
        self.find_by_text(text).is_some()
    }

    /// Items rendered as filter syntax, in item order.
    pub fn formatted_lines(&self) -> Vec<String> {
        self.items.iter().map(NegativeItem::formatted).collect()
    }

    /// Whether a row shows as marked: explicitly, or because its phrase is a
    /// negative.
    pub fn is_row_marked(&self, row_id: RowId, phrase: &str) -> bool {
        self.marked_rows.contains(&row_id) || self.contains(phrase)
    }

    /// Ids of all rows in `rows` that show as marked.
    pub fn effective_marked_rows(&self, rows: &[Row]) -> BTreeSet<RowId> {
        let index = self.membership_index();
        rows.iter()
            .filter(|row| {
                self.marked_rows.contains(&row.row_id) || index.contains_key(&row.phrase_key())
            })
            .map(|row| row.row_id)
            .collect()
    }

    /// Formatted lines joined by newlines, skipping empty lines.
    pub fn clipboard_text(&self) -> String {
        self.formatted_lines()
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
