//! Per-vector outcomes and the failure taxonomy.

use std::fmt;

use ccmkat_crypto::{CcmError, InputField, LengthField, ValidationError};
use thiserror::Error;

/// Why a vector failed.
///
/// Every variant carries enough context to diagnose the failure without
/// re-running the vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// Key, nonce or mlen absent
    #[error("{field} is missing")]
    MissingInput {
        /// Absent input
        field: InputField,
    },

    /// Key present but not 16 bytes
    #[error("key is {actual} bytes, expected {expected}")]
    InvalidKeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Nonce length differs from the profile
    #[error("nonce is {actual} bytes, expected {expected}")]
    InvalidNonceLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// mlen odd or outside 4..=16
    #[error("mlen {actual} is not one of 4, 6, 8, 10, 12, 14, 16")]
    InvalidMacLength {
        /// Supplied tag length
        actual: usize,
    },

    /// Header or payload exceeds the length field
    #[error("{field} is {len} bytes, capacity is {max}")]
    PayloadTooLarge {
        /// Overflowing part
        field: LengthField,
        /// Supplied length
        len: usize,
        /// Capacity
        max: usize,
    },

    /// Block cipher failed during sealing
    #[error("{reason}")]
    CipherOracleFailure {
        /// Oracle-supplied reason
        reason: String,
    },

    /// Output length differs from the expected length
    #[error("expected {expected} bytes, computed {actual}")]
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Computed length
        actual: usize,
    },

    /// Output bytes differ from the expected bytes
    #[error("first difference at byte {offset}: expected {expected:#04x}, computed {actual:#04x}")]
    ContentMismatch {
        /// Offset of the first differing byte
        offset: usize,
        /// Expected byte at `offset`
        expected: u8,
        /// Computed byte at `offset`
        actual: u8,
    },
}

impl FailureReason {
    /// Stable short tag for report lines.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing-input",
            Self::InvalidKeyLength { .. } => "invalid-key-length",
            Self::InvalidNonceLength { .. } => "invalid-nonce-length",
            Self::InvalidMacLength { .. } => "invalid-mac-length",
            Self::PayloadTooLarge { .. } => "payload-too-large",
            Self::CipherOracleFailure { .. } => "cipher-oracle-failure",
            Self::LengthMismatch { .. } => "length-mismatch",
            Self::ContentMismatch { .. } => "content-mismatch",
        }
    }

    /// Returns true if the vector was rejected before any cipher call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. }
                | Self::InvalidKeyLength { .. }
                | Self::InvalidNonceLength { .. }
                | Self::InvalidMacLength { .. }
                | Self::PayloadTooLarge { .. }
        )
    }
}

impl From<ValidationError> for FailureReason {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingInput { field } => Self::MissingInput { field },
            ValidationError::InvalidKeyLength { expected, actual } => {
                Self::InvalidKeyLength { expected, actual }
            },
            ValidationError::InvalidNonceLength { expected, actual } => {
                Self::InvalidNonceLength { expected, actual }
            },
            ValidationError::InvalidMacLength { actual } => Self::InvalidMacLength { actual },
            ValidationError::PayloadTooLarge { field, len, max } => {
                Self::PayloadTooLarge { field, len, max }
            },
        }
    }
}

impl From<CcmError> for FailureReason {
    fn from(err: CcmError) -> Self {
        match err {
            CcmError::Validation(err) => err.into(),
            CcmError::CipherOracleFailure(err) => Self::CipherOracleFailure { reason: err.reason },
        }
    }
}

/// Result of running one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Computed output equals the expected output
    Pass,
    /// Vector failed for the given reason
    Fail(FailureReason),
}

impl Outcome {
    /// Returns true for [`Outcome::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Failure reason, if any.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Pass => None,
            Self::Fail(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail(reason) => write!(f, "FAIL ({}: {reason})", reason.tag()),
        }
    }
}

/// Outcome of one vector, with the computed output when captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorReport {
    /// Vector identifier.
    pub id: String,
    /// Pass or fail with reason.
    pub outcome: Outcome,
    /// Computed `ciphertext ‖ tag`, present when output capture is enabled
    /// and sealing succeeded.
    pub output: Option<Vec<u8>>,
}

impl fmt::Display for VectorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use ccmkat_crypto::OracleError;

    use super::*;

    #[test]
    fn validation_errors_map_one_to_one() {
        let reason = FailureReason::from(ValidationError::InvalidNonceLength {
            expected: 13,
            actual: 12,
        });
        assert_eq!(reason, FailureReason::InvalidNonceLength { expected: 13, actual: 12 });
        assert!(reason.is_validation());
    }

    #[test]
    fn oracle_failure_maps_with_reason() {
        let reason = FailureReason::from(CcmError::from(OracleError::new("stuck")));
        assert_eq!(reason, FailureReason::CipherOracleFailure { reason: "stuck".to_string() });
        assert!(!reason.is_validation());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Pass.to_string(), "PASS");

        let fail = Outcome::Fail(FailureReason::LengthMismatch { expected: 102, actual: 101 });
        assert_eq!(fail.to_string(), "FAIL (length-mismatch: expected 102 bytes, computed 101)");

        let fail = Outcome::Fail(FailureReason::MissingInput { field: InputField::Nonce });
        assert_eq!(fail.to_string(), "FAIL (missing-input: nonce is missing)");
    }

    #[test]
    fn content_mismatch_display() {
        let reason = FailureReason::ContentMismatch { offset: 3, expected: 0x0a, actual: 0xff };
        assert_eq!(
            reason.to_string(),
            "first difference at byte 3: expected 0x0a, computed 0xff"
        );
    }

    #[test]
    fn report_line() {
        let report =
            VectorReport { id: "scenario-1c".to_string(), outcome: Outcome::Pass, output: None };
        assert_eq!(report.to_string(), "scenario-1c: PASS");
    }
}
