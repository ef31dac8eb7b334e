//! Poly1305 one-time authenticator (RFC 8439 §2.5).
//!
//! The accumulator is kept in five 26-bit limbs so that every product fits
//! in a `u64`. A `Poly1305` instance must only ever see one message: its
//! key is single-use.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Tag size in bytes.
pub const TAG_LEN: usize = 16;

const LIMB_MASK: u32 = 0x3ff_ffff;

/// Streaming Poly1305 state.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    /// Clamped `r`, five 26-bit limbs.
    r: [u32; 5],
    /// Accumulator, five 26-bit limbs.
    h: [u32; 5],
    /// Final additive key half.
    s: [u8; 16],
    buffer: [u8; 16],
    pos: usize,
}

/// Splits 17 little-endian bytes (16 data + pad byte) into 26-bit limbs.
#[inline(always)]
fn to_limbs(bytes: &[u8; 17]) -> [u32; 5] {
    let t0 = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let t1 = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let t2 = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let t3 = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
    let t4 = bytes[16] as u32;

    [
        t0 & LIMB_MASK,
        ((t0 >> 26) | (t1 << 6)) & LIMB_MASK,
        ((t1 >> 20) | (t2 << 12)) & LIMB_MASK,
        ((t2 >> 14) | (t3 << 18)) & LIMB_MASK,
        ((t3 >> 8) | (t4 << 24)) & LIMB_MASK,
    ]
}

impl Poly1305 {
    /// Creates an authenticator from a 32-byte one-time key.
    ///
    /// `key[0..16]` is clamped into `r`, `key[16..32]` is `s`.
    pub fn new(key: &[u8; 32]) -> Self {
        let mut r_bytes = [0u8; 17];
        r_bytes[..16].copy_from_slice(&key[..16]);

        // Clamp: clear the top 4 bits of bytes 3, 7, 11, 15 and the bottom
        // 2 bits of bytes 4, 8, 12.
        for i in [3, 7, 11, 15] {
            r_bytes[i] &= 0x0f;
        }
        for i in [4, 8, 12] {
            r_bytes[i] &= 0xfc;
        }

        let r = to_limbs(&r_bytes);
        r_bytes.zeroize();

        let mut s = [0u8; 16];
        s.copy_from_slice(&key[16..]);

        Self {
            r,
            h: [0; 5],
            s,
            buffer: [0; 16],
            pos: 0,
        }
    }

    /// Absorbs one block of at most 16 bytes.
    ///
    /// The block is read as a little-endian integer with a `1` appended at
    /// bit `8 * block.len()`, then `h = (h + block) * r mod 2^130 - 5`.
    fn absorb_block(&mut self, block: &[u8]) {
        let mut padded = [0u8; 17];
        padded[..block.len()].copy_from_slice(block);
        padded[block.len()] = 1;

        for (h, m) in self.h.iter_mut().zip(to_limbs(&padded)) {
            *h = h.wrapping_add(m);
        }

        let h = self.h.map(u64::from);
        let r = self.r.map(u64::from);
        let r5 = [0, r[1] * 5, r[2] * 5, r[3] * 5, r[4] * 5];

        let mut d = [
            h[0] * r[0] + h[1] * r5[4] + h[2] * r5[3] + h[3] * r5[2] + h[4] * r5[1],
            h[0] * r[1] + h[1] * r[0] + h[2] * r5[4] + h[3] * r5[3] + h[4] * r5[2],
            h[0] * r[2] + h[1] * r[1] + h[2] * r[0] + h[3] * r5[4] + h[4] * r5[3],
            h[0] * r[3] + h[1] * r[2] + h[2] * r[1] + h[3] * r[0] + h[4] * r5[4],
            h[0] * r[4] + h[1] * r[3] + h[2] * r[2] + h[3] * r[1] + h[4] * r[0],
        ];

        let mut carry = 0u64;
        for (limb, acc) in self.h.iter_mut().zip(d.iter_mut()) {
            *acc += carry;
            carry = *acc >> 26;
            *limb = (*acc as u32) & LIMB_MASK;
        }

        // 2^130 = 5 (mod p): fold the top carry back into limb 0.
        let folded = u64::from(self.h[0]) + carry * 5;
        self.h[0] = (folded as u32) & LIMB_MASK;
        self.h[1] += (folded >> 26) as u32;
    }

    /// Absorbs message bytes; may be called any number of times.
    pub fn update(&mut self, mut data: &[u8]) {
        if self.pos > 0 {
            let take = (16 - self.pos).min(data.len());
            self.buffer[self.pos..self.pos + take].copy_from_slice(&data[..take]);
            self.pos += take;
            data = &data[take..];

            if self.pos < 16 {
                return;
            }

            let block = self.buffer;
            self.absorb_block(&block);
            self.pos = 0;
        }

        let mut blocks = data.chunks_exact(16);
        for block in &mut blocks {
            self.absorb_block(block);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.pos = rest.len();
    }

    /// Zero-pads any partial block to 16 bytes and absorbs it as a full
    /// block. This is the `pad16` step of the AEAD framing.
    pub fn pad_to_block(&mut self) {
        if self.pos == 0 {
            return;
        }

        self.buffer[self.pos..].fill(0);
        let block = self.buffer;
        self.absorb_block(&block);
        self.pos = 0;
    }

    /// Completes the computation and returns the 16-byte tag.
    pub fn finalize(mut self) -> [u8; TAG_LEN] {
        if self.pos > 0 {
            let block = self.buffer;
            let len = self.pos;
            self.absorb_block(&block[..len]);
        }

        // Full carry propagation.
        let mut h = self.h;
        let mut c;

        c = h[1] >> 26;
        h[1] &= LIMB_MASK;
        for i in 2..5 {
            h[i] += c;
            c = h[i] >> 26;
            h[i] &= LIMB_MASK;
        }
        h[0] += c * 5;
        c = h[0] >> 26;
        h[0] &= LIMB_MASK;
        h[1] += c;

        // g = h + 5 - 2^130; select g when h >= p, without branching.
        let mut g = [0u32; 5];
        c = 5;
        for (g_i, h_i) in g.iter_mut().zip(&h) {
            *g_i = h_i.wrapping_add(c);
            c = *g_i >> 26;
            *g_i &= LIMB_MASK;
        }

        let mask = 0u32.wrapping_sub(c);
        for (h_i, g_i) in h.iter_mut().zip(&g) {
            *h_i = (*h_i & !mask) | (*g_i & mask);
        }

        let words = [
            h[0] | (h[1] << 26),
            (h[1] >> 6) | (h[2] << 20),
            (h[2] >> 12) | (h[3] << 14),
            (h[3] >> 18) | (h[4] << 8),
        ];

        // tag = (h + s) mod 2^128
        let mut tag = [0u8; TAG_LEN];
        let mut carry = 0u64;
        for (i, word) in words.iter().enumerate() {
            let s = u32::from_le_bytes([
                self.s[4 * i],
                self.s[4 * i + 1],
                self.s[4 * i + 2],
                self.s[4 * i + 3],
            ]);
            let sum = u64::from(*word) + u64::from(s) + carry;
            tag[4 * i..4 * i + 4].copy_from_slice(&(sum as u32).to_le_bytes());
            carry = sum >> 32;
        }

        h.zeroize();
        g.zeroize();
        tag
    }
}

/// One-shot Poly1305 tag of `message` under a one-time `key`.
pub fn authenticate(key: &[u8; 32], message: &[u8]) -> [u8; TAG_LEN] {
    let mut mac = Poly1305::new(key);
    mac.update(message);
    mac.finalize()
}
