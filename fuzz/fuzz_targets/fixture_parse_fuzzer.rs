//! Fuzz target for fixture parsing
//!
//! # Strategy
//!
//! - Random text: arbitrary UTF-8 fed straight to the TOML parser
//! - Structured vectors: well-formed tables with arbitrary hex, repeat
//!   patterns and lengths
//!
//! # Invariants
//!
//! - Parsing returns vectors or a `FixtureError`, never a panic
//! - Every parsed vector runs through the harness without panicking
//! - Repeat tables expand to exactly `len` bytes

#![no_main]

use arbitrary::Arbitrary;
use ccmkat_harness::{Harness, parse_fixture};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FixtureInput {
    RandomText(String),
    Structured { key: String, nonce: String, pattern: String, len: u16, mlen: u8 },
}

fuzz_target!(|input: FixtureInput| {
    let (text, repeat_len) = match input {
        FixtureInput::RandomText(text) => (text, None),
        FixtureInput::Structured { key, nonce, pattern, len, mlen } => (
            format!(
                "version = 1\n\n[[vector]]\nid = \"fuzz\"\nkey = {key:?}\nnonce = {nonce:?}\n\
                 plaintext = {{ repeat = {pattern:?}, len = {len} }}\nmlen = {mlen}\n\
                 expected = \"\"\n"
            ),
            Some(usize::from(len)),
        ),
    };

    let Ok(vectors) = parse_fixture(&text) else {
        return;
    };

    let harness = Harness::aes128();
    for vector in &vectors {
        let report = harness.run(vector);
        assert_eq!(report.id, vector.id);
    }

    if let (Some(len), [vector]) = (repeat_len, vectors.as_slice()) {
        assert_eq!(vector.plaintext.len(), len);
    }
});
