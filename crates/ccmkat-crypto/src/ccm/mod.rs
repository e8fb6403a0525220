//! CCM authenticated encryption (RFC 3610)
//!
//! # Construction
//!
//! ```text
//! B0 ‖ [l(a) ‖ header ‖ 0-pad] ‖ [payload ‖ 0-pad]
//!        │
//!        ▼ CBC-MAC under K
//! T (16 bytes)
//!        │
//!        ▼ ⊕ E(K, A0), truncate to M
//! tag (M bytes)
//!
//! payload block i ⊕ E(K, Ai), i = 1.. → ciphertext (same length as payload)
//! ```
//!
//! Lengths are checked before the first block is formatted. An oracle failure
//! at any point aborts the whole operation and no partial output is returned.

mod ctr;
mod format;
mod mac;

use self::{
    format::{HeaderLengthPrefix, b0},
    mac::CbcMac,
};
use crate::{
    error::CcmError,
    oracle::{Aes128Oracle, BlockCipher},
    params::{CcmParams, check_lengths},
};

/// Output of [`seal`]: ciphertext and authentication tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Encrypted payload, exactly as long as the plaintext
    pub ciphertext: Vec<u8>,
    /// Authentication tag, exactly `mlen` bytes
    pub tag: Vec<u8>,
}

impl Sealed {
    /// Concatenate into the `ciphertext ‖ tag` wire form.
    pub fn into_bytes(self) -> Vec<u8> {
        let Self { mut ciphertext, tag } = self;
        ciphertext.extend_from_slice(&tag);
        ciphertext
    }

    /// Total length of `ciphertext ‖ tag`.
    pub fn len(&self) -> usize {
        self.ciphertext.len() + self.tag.len()
    }

    /// True if both ciphertext and tag are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// CCM tag generation and encryption.
///
/// `header` is authenticated only; `plaintext` is authenticated and
/// encrypted. Either may be empty.
///
/// # Errors
///
/// - `Validation(PayloadTooLarge)`: header or plaintext exceeds 65535 bytes.
///   Raised before any cipher call.
/// - `CipherOracleFailure`: the block cipher failed; the operation is aborted.
pub fn seal<C: BlockCipher + ?Sized>(
    cipher: &C,
    params: &CcmParams,
    header: &[u8],
    plaintext: &[u8],
) -> Result<Sealed, CcmError> {
    let lengths = check_lengths(header.len(), plaintext.len())?;
    let nonce = params.nonce();
    let mac_len = params.mac_len();

    // Authentication
    let mut mac = CbcMac::new(cipher);
    mac.update(&b0(nonce, mac_len, !header.is_empty(), lengths.payload))?;
    if !header.is_empty() {
        mac.update(HeaderLengthPrefix::encode(lengths.header).as_bytes())?;
        mac.update(header)?;
        mac.pad()?;
    }
    mac.update(plaintext)?;
    let full_mac = mac.finalize()?;

    // Encryption
    let ciphertext = ctr::encrypt_payload(cipher, nonce, plaintext)?;
    let tag = ctr::mask_tag(cipher, nonce, &full_mac, mac_len)?;

    Ok(Sealed { ciphertext, tag })
}

/// [`seal`] with an AES-128 oracle keyed from `params`.
pub fn seal_aes128(
    params: &CcmParams,
    header: &[u8],
    plaintext: &[u8],
) -> Result<Sealed, CcmError> {
    let oracle = Aes128Oracle::new(params.key());
    seal(&oracle, params, header, plaintext)
}
