//! CBC-MAC variant used by CCM

use crate::{
    error::OracleError,
    oracle::{Block, BlockCipher},
    params::BLOCK_SIZE,
};

/// Incremental CBC-MAC with explicit zero-padding between message parts.
///
/// Bytes are buffered until a full block is available. [`CbcMac::pad`]
/// closes the current block with zeros so the next part starts on a block
/// boundary.
pub(crate) struct CbcMac<'c, C: ?Sized> {
    cipher: &'c C,
    state: Block,
    pending: Block,
    pending_len: usize,
}

impl<'c, C: BlockCipher + ?Sized> CbcMac<'c, C> {
    pub(crate) fn new(cipher: &'c C) -> Self {
        Self { cipher, state: [0u8; BLOCK_SIZE], pending: [0u8; BLOCK_SIZE], pending_len: 0 }
    }

    /// Absorb bytes, encrypting each block as it fills.
    pub(crate) fn update(&mut self, mut data: &[u8]) -> Result<(), OracleError> {
        while !data.is_empty() {
            let take = (BLOCK_SIZE - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];

            if self.pending_len == BLOCK_SIZE {
                self.absorb()?;
            }
        }
        Ok(())
    }

    /// Zero-pad and absorb a partially filled block. No-op on a boundary.
    pub(crate) fn pad(&mut self) -> Result<(), OracleError> {
        if self.pending_len > 0 {
            self.absorb()?;
        }
        Ok(())
    }

    /// Pad the final block and return the full 16-byte MAC value.
    pub(crate) fn finalize(mut self) -> Result<Block, OracleError> {
        self.pad()?;
        Ok(self.state)
    }

    fn absorb(&mut self) -> Result<(), OracleError> {
        for (s, p) in self.state.iter_mut().zip(self.pending.iter()) {
            *s ^= p;
        }
        self.state = self.cipher.encrypt_block(&self.state)?;
        self.pending = [0u8; BLOCK_SIZE];
        self.pending_len = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Identity "cipher" that counts calls, so the chain is just XOR.
    struct XorOnly {
        calls: Cell<usize>,
    }

    impl BlockCipher for XorOnly {
        fn encrypt_block(&self, block: &Block) -> Result<Block, OracleError> {
            self.calls.set(self.calls.get() + 1);
            Ok(*block)
        }
    }

    #[test]
    fn one_call_per_block() {
        let cipher = XorOnly { calls: Cell::new(0) };
        let mut mac = CbcMac::new(&cipher);
        mac.update(&[1u8; 33]).unwrap();
        let _ = mac.finalize().unwrap();
        assert_eq!(cipher.calls.get(), 3);
    }

    #[test]
    fn pad_on_boundary_is_noop() {
        let cipher = XorOnly { calls: Cell::new(0) };
        let mut mac = CbcMac::new(&cipher);
        mac.update(&[1u8; 16]).unwrap();
        mac.pad().unwrap();
        mac.pad().unwrap();
        assert_eq!(cipher.calls.get(), 1);
    }

    #[test]
    fn split_updates_match_single_update() {
        let cipher = XorOnly { calls: Cell::new(0) };
        let data: Vec<u8> = (0u8..40).collect();

        let mut whole = CbcMac::new(&cipher);
        whole.update(&data).unwrap();

        let mut split = CbcMac::new(&cipher);
        split.update(&data[..5]).unwrap();
        split.update(&data[5..21]).unwrap();
        split.update(&data[21..]).unwrap();

        assert_eq!(whole.finalize().unwrap(), split.finalize().unwrap());
    }

    #[test]
    fn padding_is_zeros() {
        let cipher = XorOnly { calls: Cell::new(0) };
        let mut mac = CbcMac::new(&cipher);
        mac.update(&[0xAA, 0xBB]).unwrap();
        let mut expected = [0u8; BLOCK_SIZE];
        expected[0] = 0xAA;
        expected[1] = 0xBB;
        assert_eq!(mac.finalize().unwrap(), expected);
    }

    #[test]
    fn oracle_failure_propagates() {
        struct Broken;
        impl BlockCipher for Broken {
            fn encrypt_block(&self, _block: &Block) -> Result<Block, OracleError> {
                Err(OracleError::new("offline"))
            }
        }

        let mut mac = CbcMac::new(&Broken);
        assert_eq!(mac.update(&[0u8; 16]), Err(OracleError::new("offline")));
    }
}
