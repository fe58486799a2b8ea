//! Fuzz target for the tokenizer.

#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use termsift::{token_key, tokenize};

fuzz_target!(|text: &str| {
    let mut seen = HashSet::new();
    for token in tokenize(text) {
        assert!(!token.is_empty());
        assert!(!token.chars().any(char::is_whitespace));
        assert!(seen.insert(token_key(&token)));
    }
});
