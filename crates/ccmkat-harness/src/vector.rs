//! Known-answer test vectors.

/// One CCM known-answer case.
///
/// Key, nonce and tag length are optional so that an absent input is a
/// distinct, typed case rather than an empty buffer. The validator reports
/// absent inputs as `missing-input`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestVector {
    /// Identifier used in reports.
    pub id: String,
    /// AES key. Expected to be 16 bytes.
    pub key: Option<Vec<u8>>,
    /// Nonce. Expected to be 13 bytes.
    pub nonce: Option<Vec<u8>>,
    /// Associated data (authenticated only).
    pub header: Vec<u8>,
    /// Payload (authenticated and encrypted).
    pub plaintext: Vec<u8>,
    /// Tag length in bytes.
    pub mlen: Option<usize>,
    /// Expected `ciphertext ‖ tag`.
    pub expected: Vec<u8>,
}

impl TestVector {
    /// Create a vector with the given id and no inputs.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    /// Set the key.
    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the nonce.
    pub fn with_nonce(mut self, nonce: impl Into<Vec<u8>>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Set the associated data.
    pub fn with_header(mut self, header: impl Into<Vec<u8>>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the payload.
    pub fn with_plaintext(mut self, plaintext: impl Into<Vec<u8>>) -> Self {
        self.plaintext = plaintext.into();
        self
    }

    /// Set the tag length.
    pub fn with_mlen(mut self, mlen: usize) -> Self {
        self.mlen = Some(mlen);
        self
    }

    /// Set the expected `ciphertext ‖ tag`.
    pub fn with_expected(mut self, expected: impl Into<Vec<u8>>) -> Self {
        self.expected = expected.into();
        self
    }
}
