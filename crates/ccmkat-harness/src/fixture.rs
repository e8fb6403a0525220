//! Versioned TOML fixture files.
//!
//! ```toml
//! version = 1
//!
//! [[vector]]
//! id = "scenario-2c"
//! key = "000102030405060708090a0b0c0d0e0f"
//! nonce = "000102030405060708090a0b0c"
//! header = "0001020304"
//! plaintext = { repeat = "0102030405060708090a", len = 1224 }
//! mlen = 16
//! expected = """
//! 1736b78c...
//! """
//! ```
//!
//! Byte fields are hex strings (whitespace ignored) or a `repeat` table that
//! cycles a hex pattern up to `len` bytes. `key`, `nonce` and `mlen` may be
//! omitted to describe vectors that must fail validation; `header` and
//! `plaintext` default to empty.

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::vector::TestVector;

/// Fixture format version understood by this crate.
pub const FIXTURE_VERSION: u32 = 1;

/// Errors from loading or parsing fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Fixture is not valid TOML or does not match the schema
    #[error("malformed fixture: {0}")]
    Parse(#[from] toml::de::Error),

    /// Fixture declares a version this crate does not understand
    #[error("unsupported fixture version {found}, expected {supported}")]
    UnsupportedVersion {
        /// Declared version
        found: u32,
        /// Supported version
        supported: u32,
    },

    /// A byte field is not valid hex
    #[error("vector {vector}: field {field} is not valid hex: {source}")]
    InvalidHex {
        /// Vector id
        vector: String,
        /// Field name
        field: &'static str,
        /// Decoder error
        source: hex::FromHexError,
    },

    /// A `repeat` table has an empty pattern but a non-zero length
    #[error("vector {vector}: field {field} repeats an empty pattern")]
    EmptyPattern {
        /// Vector id
        vector: String,
        /// Field name
        field: &'static str,
    },

    /// Two vectors share an id
    #[error("duplicate vector id: {id}")]
    DuplicateId {
        /// The repeated id
        id: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureFile {
    version: u32,
    #[serde(default, rename = "vector")]
    vectors: Vec<RawVector>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVector {
    id: String,
    key: Option<ByteSource>,
    nonce: Option<ByteSource>,
    header: Option<ByteSource>,
    plaintext: Option<ByteSource>,
    mlen: Option<usize>,
    expected: ByteSource,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ByteSource {
    Hex(String),
    Repeat { repeat: String, len: usize },
}

impl ByteSource {
    fn decode(&self, vector: &str, field: &'static str) -> Result<Vec<u8>, FixtureError> {
        match self {
            Self::Hex(text) => decode_hex(text, vector, field),
            Self::Repeat { repeat, len } => {
                let pattern = decode_hex(repeat, vector, field)?;
                if pattern.is_empty() && *len > 0 {
                    return Err(FixtureError::EmptyPattern { vector: vector.to_string(), field });
                }
                Ok(pattern.iter().copied().cycle().take(*len).collect())
            },
        }
    }
}

fn decode_hex(text: &str, vector: &str, field: &'static str) -> Result<Vec<u8>, FixtureError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact).map_err(|source| FixtureError::InvalidHex {
        vector: vector.to_string(),
        field,
        source,
    })
}

fn decode_optional(
    source: Option<&ByteSource>,
    vector: &str,
    field: &'static str,
) -> Result<Option<Vec<u8>>, FixtureError> {
    source.map(|s| s.decode(vector, field)).transpose()
}

impl RawVector {
    fn into_vector(self) -> Result<TestVector, FixtureError> {
        let id = self.id.as_str();
        let key = decode_optional(self.key.as_ref(), id, "key")?;
        let nonce = decode_optional(self.nonce.as_ref(), id, "nonce")?;
        let header = decode_optional(self.header.as_ref(), id, "header")?.unwrap_or_default();
        let plaintext =
            decode_optional(self.plaintext.as_ref(), id, "plaintext")?.unwrap_or_default();
        let expected = self.expected.decode(id, "expected")?;

        Ok(TestVector { id: self.id, key, nonce, header, plaintext, mlen: self.mlen, expected })
    }
}

/// Parse fixture text into test vectors, preserving file order.
pub fn parse_fixture(text: &str) -> Result<Vec<TestVector>, FixtureError> {
    let file: FixtureFile = toml::from_str(text)?;
    if file.version != FIXTURE_VERSION {
        return Err(FixtureError::UnsupportedVersion {
            found: file.version,
            supported: FIXTURE_VERSION,
        });
    }

    let vectors =
        file.vectors.into_iter().map(RawVector::into_vector).collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&vectors)?;
    Ok(vectors)
}

/// Read and parse a fixture file.
pub fn load_fixture(path: &Path) -> Result<Vec<TestVector>, FixtureError> {
    let text = fs::read_to_string(path)
        .map_err(|source| FixtureError::Io { path: path.display().to_string(), source })?;
    let vectors = parse_fixture(&text)?;
    tracing::debug!(path = %path.display(), count = vectors.len(), "loaded fixture");
    Ok(vectors)
}

/// Reject vector sets in which two vectors share an id.
pub fn ensure_unique_ids(vectors: &[TestVector]) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for vector in vectors {
        if !seen.insert(vector.id.as_str()) {
            return Err(FixtureError::DuplicateId { id: vector.id.clone() });
        }
    }
    Ok(())
}
