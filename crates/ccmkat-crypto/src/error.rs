//! Error types for CCM parameter validation and sealing

use std::fmt;

use thiserror::Error;

/// Inputs that must be present before any CCM work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    /// The 128-bit AES key.
    Key,
    /// The 13-byte nonce.
    Nonce,
    /// The MAC (tag) length.
    MacLength,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Nonce => f.write_str("nonce"),
            Self::MacLength => f.write_str("mlen"),
        }
    }
}

/// Message parts bounded by the CCM length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthField {
    /// Associated data (authenticated, not encrypted).
    Header,
    /// Plaintext payload (authenticated and encrypted).
    Payload,
}

impl fmt::Display for LengthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Payload => f.write_str("payload"),
        }
    }
}

/// Parameter rejections. None of these ever reach the block cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required input was absent
    #[error("missing input: {field}")]
    MissingInput {
        /// Which input was missing
        field: InputField,
    },

    /// Key present but not 128 bits
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes
        expected: usize,
        /// Supplied key length in bytes
        actual: usize,
    },

    /// Nonce length does not match the profile
    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Required nonce length in bytes
        expected: usize,
        /// Supplied nonce length in bytes
        actual: usize,
    },

    /// MAC length is odd or outside 4..=16
    #[error("invalid MAC length {actual}: allowed sizes are 4, 6, 8, 10, 12, 14, 16")]
    InvalidMacLength {
        /// Supplied MAC length in bytes
        actual: usize,
    },

    /// Header or payload does not fit the length field
    #[error("{field} too large: {len} bytes exceeds capacity of {max}")]
    PayloadTooLarge {
        /// Which part overflowed
        field: LengthField,
        /// Supplied length in bytes
        len: usize,
        /// Largest encodable length in bytes
        max: usize,
    },
}

/// The block cipher did not produce an output block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block cipher oracle failure: {reason}")]
pub struct OracleError {
    /// Reason reported by the oracle
    pub reason: String,
}

impl OracleError {
    /// Create an oracle error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Errors from [`seal`](crate::seal).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CcmError {
    /// Inputs rejected before any cipher call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Block cipher failed mid-computation; no partial output is returned
    #[error(transparent)]
    CipherOracleFailure(#[from] OracleError),
}

impl CcmError {
    /// Returns true if the error was raised before any block was encrypted.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
