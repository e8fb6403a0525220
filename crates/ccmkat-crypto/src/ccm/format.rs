//! CCM block formatting (RFC 3610 section 2.2 and 2.3)
//!
//! ```text
//! B0 = [ flags | nonce (13) | l(m) (2) ]
//!   flags bit 6:    Adata (header present)
//!   flags bits 3-5: (M - 2) / 2
//!   flags bits 0-2: L - 1
//!
//! Ai = [ L - 1 | nonce (13) | i (2) ]
//! ```

use crate::{
    oracle::Block,
    params::{BLOCK_SIZE, LENGTH_FIELD_SIZE, MacLength, NONCE_SIZE, Nonce},
};

/// Adata bit in the B0 flags byte.
const ADATA_FLAG: u8 = 0x40;

/// `L - 1` in the low three bits of both flags bytes.
const LENGTH_FLAGS: u8 = (LENGTH_FIELD_SIZE - 1) as u8;

/// Headers at or above this length switch to the six-byte length encoding.
pub(crate) const AAD_SHORT_LIMIT: u16 = 0xFF00;

/// Flags byte for the first authentication block.
pub(crate) fn auth_flags(has_header: bool, mac_len: MacLength) -> u8 {
    let adata = if has_header { ADATA_FLAG } else { 0 };
    adata | (mac_len.flags_field() << 3) | LENGTH_FLAGS
}

/// The first CBC-MAC block.
pub(crate) fn b0(nonce: &Nonce, mac_len: MacLength, has_header: bool, payload_len: u16) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[0] = auth_flags(has_header, mac_len);
    block[1..=NONCE_SIZE].copy_from_slice(nonce.as_bytes());
    block[NONCE_SIZE + 1..].copy_from_slice(&payload_len.to_be_bytes());
    block
}

/// Counter block `Ai`.
pub(crate) fn counter_block(nonce: &Nonce, counter: u16) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[0] = LENGTH_FLAGS;
    block[1..=NONCE_SIZE].copy_from_slice(nonce.as_bytes());
    block[NONCE_SIZE + 1..].copy_from_slice(&counter.to_be_bytes());
    block
}

/// Encoded header length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderLengthPrefix {
    bytes: [u8; 6],
    len: usize,
}

impl HeaderLengthPrefix {
    /// Encode `header_len`: two bytes below 0xFF00, otherwise `0xFFFE`
    /// followed by the 32-bit length.
    pub(crate) fn encode(header_len: u16) -> Self {
        let mut bytes = [0u8; 6];
        if header_len < AAD_SHORT_LIMIT {
            bytes[..2].copy_from_slice(&header_len.to_be_bytes());
            Self { bytes, len: 2 }
        } else {
            bytes[..2].copy_from_slice(&[0xFF, 0xFE]);
            bytes[2..].copy_from_slice(&u32::from(header_len).to_be_bytes());
            Self { bytes, len: 6 }
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}
