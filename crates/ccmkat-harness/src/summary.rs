//! Aggregated results of a conformance run.

use std::fmt;

use crate::outcome::VectorReport;

/// Per-vector reports in input order plus pass/fail totals.
///
/// A summary with no reports counts as a success; callers that require at
/// least one vector check [`Summary::total`] themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    reports: Vec<VectorReport>,
    passed: usize,
}

impl Summary {
    /// Build a summary from reports, keeping their order.
    pub fn from_reports(reports: Vec<VectorReport>) -> Self {
        let passed = reports.iter().filter(|r| r.outcome.is_pass()).count();
        Self { reports, passed }
    }

    /// Number of vectors that passed.
    pub fn count_pass(&self) -> usize {
        self.passed
    }

    /// Number of vectors that failed.
    pub fn count_fail(&self) -> usize {
        self.reports.len() - self.passed
    }

    /// Total number of vectors run.
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Ids of failing vectors, in input order.
    pub fn failing_ids(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| !r.outcome.is_pass())
            .map(|r| r.id.as_str())
            .collect()
    }

    /// Per-vector reports, in input order.
    pub fn reports(&self) -> &[VectorReport] {
        &self.reports
    }

    /// True if no vector failed.
    pub fn is_success(&self) -> bool {
        self.count_fail() == 0
    }
}

impl FromIterator<VectorReport> for Summary {
    fn from_iter<I: IntoIterator<Item = VectorReport>>(iter: I) -> Self {
        Self::from_reports(iter.into_iter().collect())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "PASS ({}/{} vectors)", self.passed, self.total())
        } else {
            write!(
                f,
                "FAIL ({} of {} vectors failed: {})",
                self.count_fail(),
                self.total(),
                self.failing_ids().join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{FailureReason, Outcome};

    fn report(id: &str, outcome: Outcome) -> VectorReport {
        VectorReport { id: id.to_string(), outcome, output: None }
    }

    #[test]
    fn counts_and_ids() {
        let summary: Summary = vec![
            report("a", Outcome::Pass),
            report("b", Outcome::Fail(FailureReason::LengthMismatch { expected: 4, actual: 3 })),
            report("c", Outcome::Pass),
            report("d", Outcome::Fail(FailureReason::InvalidMacLength { actual: 3 })),
        ]
        .into_iter()
        .collect();

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.count_pass(), 2);
        assert_eq!(summary.count_fail(), 2);
        assert_eq!(summary.failing_ids(), vec!["b", "d"]);
        assert!(!summary.is_success());
        assert_eq!(summary.to_string(), "FAIL (2 of 4 vectors failed: b, d)");
    }

    #[test]
    fn all_pass() {
        let summary = Summary::from_reports(vec![report("a", Outcome::Pass)]);
        assert!(summary.is_success());
        assert_eq!(summary.to_string(), "PASS (1/1 vectors)");
    }

    #[test]
    fn empty_is_success() {
        let summary = Summary::default();
        assert!(summary.is_success());
        assert_eq!(summary.total(), 0);
        assert!(summary.failing_ids().is_empty());
    }
}
