//! SHA-256 and SHA-224 (FIPS 180-4).
//!
//! Both variants share the same 512-bit block compression function and
//! differ only in their initial hash values and output truncation.

pub(crate) mod computations;
pub mod core;

use zeroize::{Zeroize, ZeroizeOnDrop};

use self::core::compress;
use crate::hash::buffer::BlockBuffer;

/// Block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Round constants: first 32 bits of the fractional parts of the cube roots
/// of the first 64 primes.
pub(crate) const K256: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// SHA-256 initial hash value.
pub(crate) const H256_INIT: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// SHA-224 initial hash value.
pub(crate) const H224_INIT: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

/// Streaming SHA-256/SHA-224 state.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Sha256State {
    state: [u32; 8],
    buffer: BlockBuffer<BLOCK_LEN>,
}

impl Sha256State {
    pub(crate) fn new(iv: [u32; 8]) -> Self {
        Self {
            state: iv,
            buffer: BlockBuffer::new(),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.buffer.absorb(data, |block| compress(block, state));
    }

    /// Pads, compresses the final block(s) and writes the full 32-byte
    /// state. SHA-224 callers keep the first 28 bytes.
    pub(crate) fn finalize_into(&mut self, out: &mut [u8; 32]) {
        let bit_len = (self.buffer.total_len() as u64).wrapping_shl(3);
        let state = &mut self.state;
        self.buffer
            .finish(&bit_len.to_be_bytes(), |block| compress(block, state));

        for (chunk, word) in out.chunks_exact_mut(4).zip(&self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        self.state.zeroize();
    }
}
