//! Built-in vector set compiled into the harness.

use crate::{
    fixture::{FixtureError, ensure_unique_ids, parse_fixture},
    vector::TestVector,
};

/// RFC 3610 packet vectors #1 to #12.
pub const RFC3610_FIXTURE: &str = include_str!("../../../fixtures/rfc3610.toml");

/// Profile scenarios: 1c, 2c, empty payload, no associated data, no payload.
pub const SCENARIO_FIXTURE: &str = include_str!("../../../fixtures/scenarios.toml");

/// All built-in vectors: RFC 3610 packets first, then the scenarios.
pub fn builtin_vectors() -> Result<Vec<TestVector>, FixtureError> {
    let mut vectors = parse_fixture(RFC3610_FIXTURE)?;
    vectors.extend(parse_fixture(SCENARIO_FIXTURE)?);
    ensure_unique_ids(&vectors)?;
    Ok(vectors)
}
