//! ChaCha20 stream cipher (RFC 8439, IETF variant).
//!
//! This module provides the ChaCha20 block function and a keystream XOR
//! helper. It does **not** authenticate anything by itself; see
//! [`crate::encryption::aead`] for the authenticated construction.

/// `"expand 32-byte k"` as little-endian words.
const CHACHA20_CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Size of one keystream block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Performs one ChaCha20 quarter round.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// Applies the 20-round ChaCha permutation (10 column/diagonal double rounds).
pub(crate) fn rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

fn load_le(words: &mut [u32], bytes: &[u8]) {
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

/// Generates one 64-byte keystream block for `(key, counter, nonce)`.
///
/// Reusing a `(key, nonce, counter)` triple for two different messages
/// reveals their XOR.
pub fn block(key: &[u8; 32], counter: u32, nonce: &[u8; 12]) -> [u8; 64] {
    let mut state = [0u32; 16];

    state[0..4].copy_from_slice(&CHACHA20_CONSTANTS);
    load_le(&mut state[4..12], key);
    state[12] = counter;
    load_le(&mut state[13..16], nonce);

    let original = state;
    rounds(&mut state);

    let mut out = [0u8; 64];
    for ((chunk, word), orig) in out.chunks_exact_mut(4).zip(&state).zip(&original) {
        chunk.copy_from_slice(&word.wrapping_add(*orig).to_le_bytes());
    }

    state.fill(0);
    out
}

/// XORs `data` in place with the keystream starting at block `counter`.
///
/// Encryption and decryption are the same operation. The counter wraps
/// silently; callers bounding message length (as the AEAD does) never
/// reach the wrap.
pub fn apply_keystream(key: &[u8; 32], nonce: &[u8; 12], counter: u32, data: &mut [u8]) {
    let mut block_counter = counter;

    for chunk in data.chunks_mut(BLOCK_LEN) {
        let mut keystream = block(key, block_counter, nonce);
        block_counter = block_counter.wrapping_add(1);

        for (byte, ks) in chunk.iter_mut().zip(&keystream) {
            *byte ^= ks;
        }

        keystream.fill(0);
    }
}
