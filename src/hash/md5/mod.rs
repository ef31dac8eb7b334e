//! MD5 (RFC 1321).
//!
//! Legacy compatibility only: MD5 is broken for collision resistance. It is
//! still required by older HMAC-MD5 peers and checksum formats.
//!
//! Unlike the SHA family, MD5 reads words and encodes the message length in
//! little-endian order.

pub mod core;

use zeroize::{Zeroize, ZeroizeOnDrop};

use self::core::compress;
use crate::hash::buffer::BlockBuffer;

/// Block size in bytes.
pub const BLOCK_LEN: usize = 64;

pub(crate) const MD5_INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Per-round additive constants: `floor(|sin(i + 1)| * 2^32)`.
pub(crate) const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Left-rotation amounts, four per round group.
pub(crate) const S: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Md5State {
    state: [u32; 4],
    buffer: BlockBuffer<BLOCK_LEN>,
}

impl Md5State {
    pub(crate) fn new() -> Self {
        Self {
            state: MD5_INIT,
            buffer: BlockBuffer::new(),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.buffer.absorb(data, |block| compress(block, state));
    }

    pub(crate) fn finalize_into(&mut self, out: &mut [u8; 16]) {
        let bit_len = (self.buffer.total_len() as u64).wrapping_shl(3);
        let state = &mut self.state;
        self.buffer
            .finish(&bit_len.to_le_bytes(), |block| compress(block, state));

        for (chunk, word) in out.chunks_exact_mut(4).zip(&self.state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        self.state.zeroize();
    }
}
