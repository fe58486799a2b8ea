//! Fuzz target for sequences of negative keyword edits.
//!
//! After any sequence of operations, keys stay unique and every stored
//! text is trimmed and non-empty.

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use termsift::{MatchType, NegativeId, NegativeStore};

#[derive(Arbitrary, Debug)]
enum Op {
    Add { text: String, mode: u8, row: Option<u8> },
    RemoveText { text: String, row: Option<u8> },
    RemoveId { seq: u8 },
    Update { seq: u8, mode: u8 },
}

fn mode(m: u8) -> MatchType {
    MatchType::ALL[m as usize % MatchType::ALL.len()]
}

fn id(seq: u8) -> NegativeId {
    NegativeId::from(format!("neg_{:03}", seq))
}

fuzz_target!(|ops: Vec<Op>| {
    let mut store = NegativeStore::new();

    for op in ops.into_iter().take(64) {
        store = match op {
            Op::Add { text, mode: m, row } => {
                store.add(&text, mode(m), row.map(u64::from), row.is_some())
            }
            Op::RemoveText { text, row } => {
                store.remove_by_text(&text, row.map(u64::from), row.is_some())
            }
            Op::RemoveId { seq } => store.remove_by_id(&id(seq), &[]),
            Op::Update { seq, mode: m } => store.update_match_type(&id(seq), mode(m)),
        };
    }

    let mut keys = HashSet::new();
    for item in store.items() {
        assert!(!item.text.is_empty());
        assert_eq!(item.text, item.text.trim());
        assert!(keys.insert(item.key()));
    }
});
