//! SHA-1 (RFC 3174).
//!
//! Provided for interoperability with legacy protocols and HMAC-SHA1 only.
//! SHA-1 is not collision resistant and must not be used for new designs.

pub mod core;

use zeroize::{Zeroize, ZeroizeOnDrop};

use self::core::compress;
use crate::hash::buffer::BlockBuffer;

/// Block size in bytes.
pub const BLOCK_LEN: usize = 64;

pub(crate) const H160_INIT: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Sha1State {
    state: [u32; 5],
    buffer: BlockBuffer<BLOCK_LEN>,
}

impl Sha1State {
    pub(crate) fn new() -> Self {
        Self {
            state: H160_INIT,
            buffer: BlockBuffer::new(),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.buffer.absorb(data, |block| compress(block, state));
    }

    pub(crate) fn finalize_into(&mut self, out: &mut [u8; 20]) {
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
