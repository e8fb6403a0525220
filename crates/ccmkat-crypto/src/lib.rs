//! AES-128 CCM primitives for ccmkat
//!
//! Parameter validation and authenticated encryption for the CCM profile
//! with a 13-byte nonce, a 2-byte length field and tags of 4 to 16 bytes.
//! Pure functions with deterministic outputs: no I/O, no randomness, no
//! shared state between calls.
//!
//! # Data Flow
//!
//! ```text
//! key?, nonce?, mlen?
//!        │
//!        ▼ validate()
//! CcmParams (Key, Nonce, MacLength)
//!        │
//!        ▼ Aes128Oracle::new(key)
//! BlockCipher
//!        │
//!        ▼ seal(header, plaintext)
//! Sealed { ciphertext, tag }
//! ```
//!
//! The engine only accepts [`CcmParams`], which can only be obtained through
//! [`validate`] (or from already-typed parts). Rejected inputs therefore
//! never reach the block cipher.
//!
//! # Security
//!
//! - Nonce reuse under the same key destroys both confidentiality and
//!   integrity. Callers own nonce uniqueness.
//! - Keys are zeroized on drop.
//! - Receive-side decryption and tag verification are not provided.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ccm;
pub mod error;
pub mod oracle;
pub mod params;

pub use ccm::{Sealed, seal, seal_aes128};
pub use error::{CcmError, InputField, LengthField, OracleError, ValidationError};
pub use oracle::{Aes128Oracle, Block, BlockCipher};
pub use params::{
    BLOCK_SIZE, CcmParams, KEY_SIZE, Key, LENGTH_FIELD_SIZE, MAX_HEADER_LEN, MAX_MAC_LEN,
    MAX_PAYLOAD_LEN, MIN_MAC_LEN, MacLength, MessageLengths, NONCE_SIZE, Nonce, check_lengths,
    validate,
};
