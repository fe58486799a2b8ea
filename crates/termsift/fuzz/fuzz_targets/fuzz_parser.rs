//! Fuzz target for the report parser.
//!
//! The parser must never panic on malformed input, and every parsed row
//! must take its phrase from the detected phrase column.

#![no_main]

use libfuzzer_sys::fuzz_target;
use termsift::Parser;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(dataset) = Parser::new().parse_bytes(data) {
        assert!(dataset.columns.contains(&dataset.phrase_column));
        for row in &dataset.rows {
            assert_eq!(row.get(&dataset.phrase_column).unwrap_or(""), row.phrase);
        }
    }
});
