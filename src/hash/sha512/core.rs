//! SHA-512 core hashing functions
//!
//! This module implements the core logic of the SHA-512 cryptographic hash
//! function as defined in FIPS 180-4.
//!
//! It provides:
//! - the compression function operating on 1024-bit blocks
//! - one-shot SHA-512 and SHA-384 functions for arbitrary-length input
//!
//! Streaming callers go through [`crate::hash::HashContext`] instead.

use super::computations::all_rounds;
use super::{H384_INIT, H512_INIT, Sha512State};

/// Compresses a single 1024-bit message block.
///
/// Input words are interpreted as big-endian, as required by SHA-512. The
/// first 16 schedule words are loaded here; `all_rounds` expands the rest
/// on the fly.
pub fn compress(block: &[u8; 128], state: &mut [u64; 8]) {
    let mut w = [0u64; 16];

    for (slot, chunk) in w.iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *slot = u64::from_be_bytes(word);
    }

    all_rounds(state, &mut w);
}

/// Computes the SHA-512 hash of the given input.
///
/// # Returns
/// - The final SHA-512 hash as 64 bytes (`[u8; 64]`)
pub fn sha512(input: &[u8]) -> [u8; 64] {
    let mut engine = Sha512State::new(H512_INIT);
    engine.update(input);

    let mut out = [0u8; 64];
    engine.finalize_into(&mut out);
    out
}

/// Computes the SHA-384 hash of the given input.
///
/// SHA-384 is SHA-512 with distinct initial values, truncated to 48 bytes.
pub fn sha384(input: &[u8]) -> [u8; 48] {
    let mut engine = Sha512State::new(H384_INIT);
    engine.update(input);

    let mut full = [0u8; 64];
    engine.finalize_into(&mut full);

    let mut out = [0u8; 48];
    out.copy_from_slice(&full[..48]);
    out
}
