//! Output checks applied to computed `ciphertext ‖ tag`.
//!
//! A check compares the computed output of one vector against its expected
//! bytes. The registry runs checks in registration order and stops at the
//! first failure, so a length mismatch is reported as such and never as a
//! content mismatch.
//!
//! # Usage
//!
//! ```
//! use ccmkat_harness::{CheckRegistry, Observation};
//!
//! let registry = CheckRegistry::standard();
//! let observation = Observation { expected: &[1, 2, 3], actual: &[1, 2, 3] };
//! assert!(registry.check_first(&observation).is_ok());
//! ```

use crate::outcome::FailureReason;

/// Result of a single check.
pub type CheckResult = Result<(), FailureReason>;

/// Expected and computed output of one vector.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    /// Expected `ciphertext ‖ tag`.
    pub expected: &'a [u8],
    /// Computed `ciphertext ‖ tag`.
    pub actual: &'a [u8],
}

/// A comparison between computed and expected output.
pub trait OutputCheck: Send + Sync {
    /// Check name for logging.
    fn name(&self) -> &'static str;

    /// Check the observation.
    ///
    /// Returns `Ok(())` if the check holds, or the [`FailureReason`]
    /// describing what went wrong.
    fn check(&self, observation: &Observation<'_>) -> CheckResult;
}

/// Output must be exactly as long as the expected bytes.
pub struct LengthMatches;

impl OutputCheck for LengthMatches {
    fn name(&self) -> &'static str {
        "length-matches"
    }

    fn check(&self, observation: &Observation<'_>) -> CheckResult {
        let expected = observation.expected.len();
        let actual = observation.actual.len();
        if expected != actual {
            return Err(FailureReason::LengthMismatch { expected, actual });
        }
        Ok(())
    }
}

/// Output bytes must equal the expected bytes.
///
/// Compares the common prefix only; length is [`LengthMatches`]' concern.
pub struct ContentMatches;

impl OutputCheck for ContentMatches {
    fn name(&self) -> &'static str {
        "content-matches"
    }

    fn check(&self, observation: &Observation<'_>) -> CheckResult {
        let mismatch = observation
            .expected
            .iter()
            .zip(observation.actual.iter())
            .enumerate()
            .find(|(_, (e, a))| e != a);

        match mismatch {
            Some((offset, (&expected, &actual))) => {
                Err(FailureReason::ContentMismatch { offset, expected, actual })
            },
            None => Ok(()),
        }
    }
}

/// Ordered set of output checks.
pub struct CheckRegistry {
    checks: Vec<Box<dyn OutputCheck>>,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CheckRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a registry with the standard exact-match checks.
    ///
    /// Includes, in order:
    /// - [`LengthMatches`]: lengths agree
    /// - [`ContentMatches`]: bytes agree
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(LengthMatches);
        registry.add(ContentMatches);
        registry
    }

    /// Append a check.
    pub fn add<C: OutputCheck + 'static>(&mut self, check: C) {
        self.checks.push(Box::new(check));
    }

    /// Run checks in order, returning the first failure.
    pub fn check_first(&self, observation: &Observation<'_>) -> CheckResult {
        for check in &self.checks {
            if let Err(reason) = check.check(observation) {
                tracing::trace!(check = check.name(), "output check failed");
                return Err(reason);
            }
        }
        Ok(())
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_checks() {
        let registry = CheckRegistry::standard();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn empty_registry_accepts_anything() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.check_first(&Observation { expected: &[1], actual: &[] }).is_ok());
    }

    #[test]
    fn length_checked_before_content() {
        let registry = CheckRegistry::standard();
        let observation = Observation { expected: &[1, 2, 3], actual: &[9, 2] };
        assert_eq!(
            registry.check_first(&observation),
            Err(FailureReason::LengthMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn content_mismatch_reports_first_offset() {
        let observation = Observation { expected: &[1, 2, 3, 4], actual: &[1, 2, 7, 8] };
        assert_eq!(
            ContentMatches.check(&observation),
            Err(FailureReason::ContentMismatch { offset: 2, expected: 3, actual: 7 })
        );
    }

    #[test]
    fn equal_outputs_pass() {
        let registry = CheckRegistry::standard();
        let observation = Observation { expected: &[0xAB; 20], actual: &[0xAB; 20] };
        assert!(registry.check_first(&observation).is_ok());
    }

    #[test]
    fn empty_outputs_pass() {
        let registry = CheckRegistry::standard();
        assert!(registry.check_first(&Observation { expected: &[], actual: &[] }).is_ok());
    }
}
