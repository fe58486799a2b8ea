//! Property-based tests for the negative store, formatter and tokenizer.
//!
//! These tests use proptest to generate random inputs and verify that the
//! collection keeps its invariants under any sequence of edits.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p termsift --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p termsift --test property_tests
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use proptest::prelude::*;

use termsift::negatives::{MatchType, NegativeStore, dedup_key, format_negative};
use termsift::{Row, token_key, tokenize};

// =============================================================================
// Test Strategies
// =============================================================================

/// Short phrases built from a small vocabulary so duplicates are common.
fn phrase() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof!["red", "Red", "shoes", "SHOES", "cheap", "free", "купить"],
        1..4,
    )
    .prop_map(|words| words.join(" "))
}

/// Add surrounding whitespace and random casing to a phrase.
fn variant_of(base: String) -> impl Strategy<Value = String> {
    (
        "[ \t]{0,3}",
        "[ \t]{0,3}",
        prop::collection::vec(any::<bool>(), base.chars().count()),
    )
        .prop_map(move |(left, right, upper)| {
            let body: String = base
                .chars()
                .zip(upper)
                .map(|(c, up)| {
                    if up {
                        c.to_uppercase().collect::<String>()
                    } else {
                        c.to_lowercase().collect::<String>()
                    }
                })
                .collect();
            format!("{}{}{}", left, body, right)
        })
}

fn match_type() -> impl Strategy<Value = MatchType> {
    prop_oneof![
        Just(MatchType::Exact),
        Just(MatchType::Phrase),
        Just(MatchType::Broad)
    ]
}

fn rows_for(phrases: &[String]) -> Vec<Row> {
    phrases
        .iter()
        .zip(1..)
        .map(|(phrase, row_id)| Row {
            row_id,
            fields: IndexMap::from([("Search term".to_string(), phrase.clone())]),
            phrase: phrase.clone(),
        })
        .collect()
}

fn keys(store: &NegativeStore) -> Vec<String> {
    store.items().iter().map(|item| item.key()).collect()
}

proptest! {
    /// Adding the same text in any casing/whitespace leaves exactly one item.
    #[test]
    fn dedup_idempotence(
        (base, variants) in phrase().prop_flat_map(|base| {
            let variants = prop::collection::vec(variant_of(base.clone()), 1..6);
            (Just(base), variants)
        }),
        mt in match_type(),
    ) {
        let mut store = NegativeStore::new();
        for text in &variants {
            store = store.add(text, mt, None, false);
        }

        let key = dedup_key(&base);
        let matching = store.items().iter().filter(|item| item.key() == key).count();
        prop_assert_eq!(matching, 1);
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(&store.items()[0].text, variants[0].trim());
    }

    /// Keys stay unique after arbitrary adds.
    #[test]
    fn keys_are_unique(texts in prop::collection::vec(phrase(), 0..20)) {
        let mut store = NegativeStore::new();
        for text in &texts {
            store = store.add(text, MatchType::Broad, None, false);
        }

        let keys = keys(&store);
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());

        let expected: HashSet<String> = texts.iter().map(|t| dedup_key(t)).collect();
        prop_assert_eq!(keys.len(), expected.len());
    }

    /// Adding a new text and removing it again restores the item list.
    #[test]
    fn add_remove_round_trip(
        existing in prop::collection::vec(phrase(), 0..8),
        text in phrase(),
        mt in match_type(),
    ) {
        let mut store = NegativeStore::new();
        for t in &existing {
            store = store.add(t, MatchType::Exact, None, false);
        }
        prop_assume!(!store.contains(&text));

        let after = store
            .add(&text, mt, Some(1), true)
            .remove_by_text(&text, Some(1), true);

        prop_assert_eq!(after.items(), store.items());
        prop_assert_eq!(after.marked_rows(), store.marked_rows());
    }

    /// After removing an item by id, no row whose phrase matches it stays marked.
    #[test]
    fn remove_by_id_unmarks_matching_rows(
        phrases in prop::collection::vec(phrase(), 1..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let rows = rows_for(&phrases);
        let mut store = NegativeStore::new();
        for row in &rows {
            store = store.add(&row.phrase, MatchType::Exact, Some(row.row_id), true);
        }

        let target = pick.get(store.items()).clone();
        let store = store.remove_by_id(&target.id, &rows);

        for row in &rows {
            if row.phrase_key() == target.key() {
                prop_assert!(!store.marked_rows().contains(&row.row_id));
                prop_assert!(!store.is_row_marked(row.row_id, &row.phrase));
            }
        }
        prop_assert!(store.get(&target.id).is_none());
    }

    /// Effective marks always include explicit marks and phrase matches.
    #[test]
    fn effective_marks_match_definition(
        phrases in prop::collection::vec(phrase(), 1..10),
        negatives in prop::collection::vec(phrase(), 0..5),
        explicit in prop::collection::vec(1u64..10, 0..4),
    ) {
        let rows = rows_for(&phrases);
        let mut store = NegativeStore::new();
        for text in &negatives {
            store = store.add(text, MatchType::Phrase, None, false);
        }
        for row_id in &explicit {
            store = store.add(&negatives.first().cloned().unwrap_or_else(|| "x".into()), MatchType::Phrase, Some(*row_id), true);
        }

        let marked = store.effective_marked_rows(&rows);
        for row in &rows {
            let expected = store.marked_rows().contains(&row.row_id) || store.contains(&row.phrase);
            prop_assert_eq!(marked.contains(&row.row_id), expected);
            prop_assert_eq!(store.is_row_marked(row.row_id, &row.phrase), expected);
        }
    }

    /// Formatting only wraps; the inner text is untouched.
    #[test]
    fn formatter_wraps_verbatim(text in "[a-zA-Zа-я0-9 ]{0,30}") {
        prop_assert_eq!(format_negative(&text, MatchType::Exact), format!("[{}]", text));
        prop_assert_eq!(format_negative(&text, MatchType::Phrase), format!("\"{}\"", text));
        prop_assert_eq!(format_negative(&text, MatchType::Broad), text.clone());
    }

    /// Tokens are non-empty, whitespace-free and unique by key.
    #[test]
    fn tokenizer_invariants(text in "\\PC{0,60}") {
        let tokens = tokenize(&text);
        let mut seen = HashSet::new();
        for token in &tokens {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert!(seen.insert(token_key(token)));
            prop_assert!(text.contains(token.as_str()));
        }
        prop_assert_eq!(tokenize(&text), tokens);
    }

    /// Whitespace-only phrases have no tokens.
    #[test]
    fn tokenizer_blank(text in "[ \t\n]{0,10}") {
        prop_assert!(tokenize(&text).is_empty());
    }
}
