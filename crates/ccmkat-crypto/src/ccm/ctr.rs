//! CTR keystream for CCM
//!
//! Counter 0 is reserved for masking the MAC. Payload block `i` (counting
//! from 1) is masked with `E(K, Ai)`.

use super::format::counter_block;
use crate::{
    error::{CcmError, LengthField, OracleError, ValidationError},
    oracle::{Block, BlockCipher},
    params::{BLOCK_SIZE, MAX_PAYLOAD_LEN, MacLength, Nonce},
};

/// Encrypt `payload` with counters 1, 2, ...
///
/// The last block is truncated to the remaining payload length, so the
/// output is exactly `payload.len()` bytes.
pub(crate) fn encrypt_payload<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &Nonce,
    payload: &[u8],
) -> Result<Vec<u8>, CcmError> {
    let mut out = Vec::with_capacity(payload.len());

    for (index, chunk) in payload.chunks(BLOCK_SIZE).enumerate() {
        let counter = u16::try_from(index + 1).map_err(|_| ValidationError::PayloadTooLarge {
            field: LengthField::Payload,
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        })?;
        let keystream = cipher.encrypt_block(&counter_block(nonce, counter))?;
        out.extend(chunk.iter().zip(keystream.iter()).map(|(p, k)| p ^ k));
    }

    Ok(out)
}

/// Mask the full CBC-MAC value with `E(K, A0)` and truncate to the tag length.
pub(crate) fn mask_tag<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &Nonce,
    mac: &Block,
    mac_len: MacLength,
) -> Result<Vec<u8>, OracleError> {
    let s0 = cipher.encrypt_block(&counter_block(nonce, 0))?;
    Ok(mac.iter().zip(s0.iter()).take(mac_len.get()).map(|(m, s)| m ^ s).collect())
}
