//! Fuzz target for parameter validation and CCM sealing
//!
//! # Strategy
//!
//! - Arbitrary key, nonce and tag lengths, including absent inputs
//! - Arbitrary header and payload contents up to a few kilobytes
//! - Oracles that fail after an arbitrary number of blocks
//!
//! # Invariants
//!
//! - Validation either yields parameters or a typed error, never a panic
//! - Accepted parameters always seal: ciphertext as long as the plaintext,
//!   tag exactly `mlen` bytes
//! - Sealing is deterministic
//! - An injected oracle failure surfaces as `CipherOracleFailure`, never as
//!   partial output

#![no_main]

use std::cell::Cell;

use arbitrary::Arbitrary;
use ccmkat_crypto::{
    Aes128Oracle, Block, BlockCipher, CcmError, OracleError, check_lengths, seal, seal_aes128,
    validate,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct SealScenario {
    key: Option<Vec<u8>>,
    nonce: Option<Vec<u8>>,
    mlen: Option<u8>,
    header: Vec<u8>,
    plaintext: Vec<u8>,
    fail_after: Option<u8>,
}

struct FaultyOracle {
    inner: Aes128Oracle,
    remaining: Cell<usize>,
}

impl BlockCipher for FaultyOracle {
    fn encrypt_block(&self, block: &Block) -> Result<Block, OracleError> {
        if self.remaining.get() == 0 {
            return Err(OracleError::new("fuzz fault"));
        }
        self.remaining.set(self.remaining.get() - 1);
        self.inner.encrypt_block(block)
    }
}

fuzz_target!(|scenario: SealScenario| {
    let params = match validate(
        scenario.key.as_deref(),
        scenario.nonce.as_deref(),
        scenario.mlen.map(usize::from),
    ) {
        Ok(params) => params,
        Err(_) => return,
    };
    if check_lengths(scenario.header.len(), scenario.plaintext.len()).is_err() {
        return;
    }

    let sealed = seal_aes128(&params, &scenario.header, &scenario.plaintext)
        .expect("validated parameters within capacity must seal");
    assert_eq!(sealed.ciphertext.len(), scenario.plaintext.len());
    assert_eq!(sealed.tag.len(), params.mac_len().get());

    let again = seal_aes128(&params, &scenario.header, &scenario.plaintext)
        .expect("second seal");
    assert_eq!(sealed, again);

    if let Some(fail_after) = scenario.fail_after {
        let oracle = FaultyOracle {
            inner: Aes128Oracle::new(params.key()),
            remaining: Cell::new(usize::from(fail_after)),
        };
        match seal(&oracle, &params, &scenario.header, &scenario.plaintext) {
            Ok(faulty) => assert_eq!(faulty, sealed),
            Err(err) => assert!(matches!(err, CcmError::CipherOracleFailure(_))),
        }
    }
});
