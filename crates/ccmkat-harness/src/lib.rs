//! Known-answer conformance harness for AES-128 CCM.
//!
//! Drives [`TestVector`]s through the parameter validator and the CCM engine
//! from `ccmkat-crypto` and reports PASS or FAIL per vector, with a typed
//! [`FailureReason`] for every failure.
//!
//! # Pipeline
//!
//! ```text
//! fixture TOML ──parse_fixture──▶ TestVector
//!                                    │
//!                                    ▼ Harness::run
//!                       validate, check_lengths, seal
//!                                    │
//!                                    ▼ CheckRegistry
//!                              VectorReport ──▶ Summary
//! ```
//!
//! # Output Checks
//!
//! The `checks` module holds the comparisons applied to computed output.
//! [`CheckRegistry::standard()`] checks length before content, so a short
//! output is reported as `length-mismatch` and never as a byte difference.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builtin;
pub mod checks;
pub mod fixture;
pub mod outcome;
pub mod runner;
pub mod summary;
pub mod vector;

pub use builtin::builtin_vectors;
pub use checks::{
    CheckRegistry, CheckResult, ContentMatches, LengthMatches, Observation, OutputCheck,
};
pub use fixture::{FIXTURE_VERSION, FixtureError, ensure_unique_ids, load_fixture, parse_fixture};
pub use outcome::{FailureReason, Outcome, VectorReport};
pub use runner::{Aes128Factory, Harness, RunConfig};
pub use summary::Summary;
pub use vector::TestVector;
