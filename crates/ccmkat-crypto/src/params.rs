//! Parameter validation for the AES-128 CCM profile
//!
//! The profile fixes a 13-byte nonce, which leaves a 2-byte length field in
//! the 16-byte formatting blocks. Every check here runs before a single block
//! is formatted: a nonce of the wrong length would shift the length field and
//! corrupt every block built afterwards.
//!
//! [`validate`] turns loosely supplied inputs into [`CcmParams`]. The engine
//! only accepts `CcmParams`, so unvalidated inputs cannot reach the cipher.

use std::fmt;

use zeroize::Zeroize;

use crate::error::{InputField, LengthField, ValidationError};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES-128 key size in bytes.
pub const KEY_SIZE: usize = 16;

/// Nonce size fixed by this profile.
pub const NONCE_SIZE: usize = 13;

/// Width of the message length field (`L = 15 - nonce length`).
pub const LENGTH_FIELD_SIZE: usize = 15 - NONCE_SIZE;

/// Largest payload the 2-byte length field can encode.
pub const MAX_PAYLOAD_LEN: usize = (1 << (8 * LENGTH_FIELD_SIZE)) - 1;

/// Largest header accepted by this profile.
pub const MAX_HEADER_LEN: usize = 0xFFFF;

/// Smallest allowed MAC length in bytes.
pub const MIN_MAC_LEN: usize = 4;

/// Largest allowed MAC length in bytes.
pub const MAX_MAC_LEN: usize = 16;

/// A 128-bit AES key.
///
/// Zeroized on drop. `Debug` never prints key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy a key out of a slice, rejecting anything but 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            ValidationError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() }
        })?;
        Ok(Self(key))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A 13-byte CCM nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Wrap raw nonce bytes.
    pub fn new(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy a nonce out of a slice, rejecting anything but 13 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let nonce: [u8; NONCE_SIZE] = bytes.try_into().map_err(|_| {
            ValidationError::InvalidNonceLength { expected: NONCE_SIZE, actual: bytes.len() }
        })?;
        Ok(Self(nonce))
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// Tag length in bytes: one of 4, 6, 8, 10, 12, 14, 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacLength(u8);

impl MacLength {
    /// Validate a tag length.
    pub fn new(len: usize) -> Result<Self, ValidationError> {
        if !(MIN_MAC_LEN..=MAX_MAC_LEN).contains(&len) || len % 2 != 0 {
            return Err(ValidationError::InvalidMacLength { actual: len });
        }
        Ok(Self(len as u8))
    }

    /// Tag length in bytes.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// The 3-bit `(M - 2) / 2` encoding carried in the B0 flags byte.
    pub fn flags_field(self) -> u8 {
        (self.0 - 2) / 2
    }
}

/// Validated CCM parameters: key, nonce and tag length.
#[derive(Debug, Clone)]
pub struct CcmParams {
    key: Key,
    nonce: Nonce,
    mac_len: MacLength,
}

impl CcmParams {
    /// Assemble parameters from already-typed parts.
    pub fn new(key: Key, nonce: Nonce, mac_len: MacLength) -> Self {
        Self { key, nonce, mac_len }
    }

    /// The AES key.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The nonce.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// The tag length.
    pub fn mac_len(&self) -> MacLength {
        self.mac_len
    }
}

/// Header and payload lengths that fit the CCM length fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLengths {
    /// Header length in bytes
    pub header: u16,
    /// Payload length in bytes
    pub payload: u16,
}

/// Validate key, nonce and tag length.
///
/// Checks run in a fixed order and stop at the first failure:
/// key present and 16 bytes, nonce present, mlen present, nonce is 13 bytes,
/// mlen is even and within 4..=16.
pub fn validate(
    key: Option<&[u8]>,
    nonce: Option<&[u8]>,
    mlen: Option<usize>,
) -> Result<CcmParams, ValidationError> {
    let key = key.ok_or(ValidationError::MissingInput { field: InputField::Key })?;
    let key = Key::from_slice(key)?;
    let nonce = nonce.ok_or(ValidationError::MissingInput { field: InputField::Nonce })?;
    let mlen = mlen.ok_or(ValidationError::MissingInput { field: InputField::MacLength })?;

    let nonce = Nonce::from_slice(nonce)?;
    let mac_len = MacLength::new(mlen)?;

    Ok(CcmParams { key, nonce, mac_len })
}

/// Check that header and payload fit their length fields.
pub fn check_lengths(
    header_len: usize,
    payload_len: usize,
) -> Result<MessageLengths, ValidationError> {
    let header = u16::try_from(header_len).map_err(|_| ValidationError::PayloadTooLarge {
        field: LengthField::Header,
        len: header_len,
        max: MAX_HEADER_LEN,
    })?;
    let payload = u16::try_from(payload_len).map_err(|_| ValidationError::PayloadTooLarge {
        field: LengthField::Payload,
        len: payload_len,
        max: MAX_PAYLOAD_LEN,
    })?;

    Ok(MessageLengths { header, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [0u8; 16];
    const NONCE: [u8; 13] = [0u8; 13];

    #[test]
    fn accepts_all_even_mac_lengths() {
        for mlen in [4, 6, 8, 10, 12, 14, 16] {
            let params = validate(Some(&KEY[..]), Some(&NONCE[..]), Some(mlen)).unwrap();
            assert_eq!(params.mac_len().get(), mlen);
        }
    }

    #[test]
    fn rejects_odd_and_out_of_range_mac_lengths() {
        for mlen in [0, 1, 2, 3, 5, 7, 9, 11, 13, 15, 17, 18, 32, usize::MAX] {
            let err = validate(Some(&KEY[..]), Some(&NONCE[..]), Some(mlen)).unwrap_err();
            assert_eq!(err, ValidationError::InvalidMacLength { actual: mlen });
        }
    }

    #[test]
    fn rejects_wrong_nonce_lengths() {
        for len in [0, 7, 12, 14, 16] {
            let nonce = vec![0u8; len];
            let err = validate(Some(&KEY[..]), Some(&nonce[..]), Some(8)).unwrap_err();
            assert_eq!(err, ValidationError::InvalidNonceLength { expected: 13, actual: len });
        }
    }

    #[test]
    fn rejects_wrong_key_length() {
        let err = validate(Some(&[0u8; 32][..]), Some(&NONCE[..]), Some(8)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidKeyLength { expected: 16, actual: 32 });
    }

    #[test]
    fn missing_inputs_checked_in_order() {
        let err = validate(None, None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingInput { field: InputField::Key });

        let err = validate(Some(&KEY[..]), None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingInput { field: InputField::Nonce });

        let err = validate(Some(&KEY[..]), Some(&NONCE[..]), None).unwrap_err();
        assert_eq!(err, ValidationError::MissingInput { field: InputField::MacLength });
    }

    #[test]
    fn presence_checked_before_nonce_length() {
        // A short nonce with a missing mlen reports the missing input first
        let err = validate(Some(&KEY[..]), Some(&[0u8; 4][..]), None).unwrap_err();
        assert_eq!(err, ValidationError::MissingInput { field: InputField::MacLength });
    }

    #[test]
    fn nonce_length_checked_before_mac_length() {
        let err = validate(Some(&KEY[..]), Some(&[0u8; 12][..]), Some(3)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNonceLength { .. }));
    }

    #[test]
    fn mac_flags_field() {
        let expected = [(4, 1), (6, 2), (8, 3), (10, 4), (12, 5), (14, 6), (16, 7)];
        for (mlen, field) in expected {
            assert_eq!(MacLength::new(mlen).unwrap().flags_field(), field);
        }
    }

    #[test]
    fn length_capacity() {
        assert_eq!(
            check_lengths(0xFFFF, 0xFFFF).unwrap(),
            MessageLengths { header: 0xFFFF, payload: 0xFFFF }
        );

        let err = check_lengths(0, MAX_PAYLOAD_LEN + 1).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::PayloadTooLarge { field: LengthField::Payload, len: 65536, .. }
        ));

        let err = check_lengths(MAX_HEADER_LEN + 1, 0).unwrap_err();
        assert!(matches!(err, ValidationError::PayloadTooLarge { field: LengthField::Header, .. }));
    }

    #[test]
    fn key_debug_is_redacted() {
        let key = Key::new([0xAB; 16]);
        assert_eq!(format!("{key:?}"), "Key([REDACTED])");
    }
}
