//! Block cipher oracle
//!
//! CCM needs exactly one primitive: encrypt a single 16-byte block under a
//! fixed key. [`BlockCipher`] is that seam. [`Aes128Oracle`] binds it to
//! RustCrypto's AES implementation; tests substitute counting or failing
//! oracles.

use std::fmt;

use aes::{
    Aes128,
    cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray},
};

use crate::{
    error::OracleError,
    params::{BLOCK_SIZE, Key},
};

/// A single cipher block.
pub type Block = [u8; BLOCK_SIZE];

/// Single-block encryption under a key bound at construction.
///
/// Implementations must be deterministic. Production implementations should
/// be constant-time.
pub trait BlockCipher {
    /// Encrypt one block.
    fn encrypt_block(&self, block: &Block) -> Result<Block, OracleError>;
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    fn encrypt_block(&self, block: &Block) -> Result<Block, OracleError> {
        (**self).encrypt_block(block)
    }
}

/// AES-128 block cipher oracle.
pub struct Aes128Oracle {
    cipher: Aes128,
}

impl Aes128Oracle {
    /// Expand the key schedule for `key`.
    pub fn new(key: &Key) -> Self {
        Self { cipher: Aes128::new(GenericArray::from_slice(key.as_bytes())) }
    }
}

impl BlockCipher for Aes128Oracle {
    fn encrypt_block(&self, block: &Block) -> Result<Block, OracleError> {
        let mut buffer = GenericArray::clone_from_slice(block);
        self.cipher.encrypt_block(&mut buffer);

        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&buffer);
        Ok(out)
    }
}

impl fmt::Debug for Aes128Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes128Oracle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS-197 appendix C.1
    #[test]
    fn fips197_aes128_block() {
        let key = Key::from_slice(&hex::decode("000102030405060708090a0b0c0d0e0f").unwrap())
            .unwrap();
        let plaintext: Block =
            hex::decode("00112233445566778899aabbccddeeff").unwrap().try_into().unwrap();

        let oracle = Aes128Oracle::new(&key);
        let ciphertext = oracle.encrypt_block(&plaintext).unwrap();

        assert_eq!(hex::encode(ciphertext), "69c4e0d86a7b0430d8cdb78070b4c55a");
    }

    #[test]
    fn oracle_is_deterministic() {
        let oracle = Aes128Oracle::new(&Key::new([7u8; 16]));
        let block = [0x5Au8; BLOCK_SIZE];
        assert_eq!(oracle.encrypt_block(&block).unwrap(), oracle.encrypt_block(&block).unwrap());
    }

    #[test]
    fn reference_delegates() {
        let oracle = Aes128Oracle::new(&Key::new([1u8; 16]));
        let by_ref = &oracle;
        let block = [0u8; BLOCK_SIZE];
        assert_eq!(by_ref.encrypt_block(&block).unwrap(), oracle.encrypt_block(&block).unwrap());
    }
}
