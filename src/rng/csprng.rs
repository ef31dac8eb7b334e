//! ChaCha20-based CSPRNG
//!
//! This module implements a cryptographically secure pseudorandom number
//! generator built on the ChaCha20 block function:
//! - seeded from the operating system
//! - expands randomness with ChaCha20 as a deterministic bit generator
//! - rekeys after every request for forward secrecy

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encryption::chacha20;
use crate::error::Result;
use crate::os::sys_random;

/// Cryptographically secure pseudorandom number generator.
///
/// Internally it keeps a secret ChaCha20 key and a block counter; the nonce
/// is fixed to zero. After each [`Csprng::fill_bytes`] call the key is
/// replaced by fresh keystream, so compromise of the current state does
/// not reveal earlier output.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Csprng {
    key: [u8; 32],
    nonce: [u8; 12],
    counter: u32,
}

impl Csprng {
    /// Creates a new CSPRNG seeded from the operating system.
    ///
    /// # Errors
    /// `EntropyUnavailable` if the OS entropy source fails.
    pub fn from_os() -> Result<Self> {
        let mut seed = [0u8; 32];
        sys_random(&mut seed)?;

        Ok(Self::from_seed(seed))
    }

    /// Creates a new CSPRNG from a caller-provided seed.
    ///
    /// The seed must be uniformly random and unpredictable. Two generators
    /// built from the same seed produce the same stream, which is only
    /// useful for tests.
    pub fn from_seed(mut seed: [u8; 32]) -> Self {
        let key = seed;
        seed.zeroize();

        Self {
            key,
            nonce: [0u8; 12],
            counter: 0,
        }
    }

    /// Fills `out` with random bytes, then rekeys.
    ///
    /// Requests longer than the 32-bit block counter covers rekey in the
    /// middle, so no keystream block is ever emitted twice.
    pub fn fill_bytes(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(chacha20::BLOCK_LEN) {
            if self.counter == u32::MAX {
                self.rekey();
            }

            let mut block = chacha20::block(&self.key, self.counter, &self.nonce);
            self.counter += 1;

            chunk.copy_from_slice(&block[..chunk.len()]);
            block.zeroize();
        }

        self.rekey();
    }

    /// Returns a uniformly random `u32`.
    pub fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    /// Replaces the key with the first half of a fresh keystream block and
    /// restarts the counter.
    fn rekey(&mut self) {
        let mut block = chacha20::block(&self.key, self.counter, &self.nonce);

        self.key.copy_from_slice(&block[..32]);
        self.counter = 0;
        block.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_request_rekeys_before_the_counter_wraps() {
        let seed = [0x5cu8; 32];
        let mut rng = Csprng::from_seed(seed);
        rng.counter = u32::MAX - 1;

        let mut out = [0u8; 3 * chacha20::BLOCK_LEN];
        rng.fill_bytes(&mut out);

        let nonce = [0u8; 12];
        let mut next_key = [0u8; 32];
        next_key.copy_from_slice(&chacha20::block(&seed, u32::MAX, &nonce)[..32]);

        let mut expected = Vec::new();
        expected.extend_from_slice(&chacha20::block(&seed, u32::MAX - 1, &nonce));
        expected.extend_from_slice(&chacha20::block(&next_key, 0, &nonce));
        expected.extend_from_slice(&chacha20::block(&next_key, 1, &nonce));
        assert_eq!(out.to_vec(), expected);

        let blocks: Vec<_> = out.chunks(chacha20::BLOCK_LEN).collect();
        assert_ne!(blocks[0], blocks[1]);
        assert_ne!(blocks[1], blocks[2]);
    }
}
