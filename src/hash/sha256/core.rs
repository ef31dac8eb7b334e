use super::computations::all_rounds;
use super::{H224_INIT, H256_INIT, Sha256State};

/// Compresses a single 512-bit block into `state`.
#[inline(always)]
pub fn compress(block: &[u8; 64], state: &mut [u32; 8]) {
    let mut w = [0u32; 16];

    for (slot, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *slot = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    all_rounds(state, &mut w);
}

/// Computes the SHA-256 digest of `input`.
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut engine = Sha256State::new(H256_INIT);
    engine.update(input);

    let mut out = [0u8; 32];
    engine.finalize_into(&mut out);
    out
}

/// Computes the SHA-224 digest of `input`.
pub fn sha224(input: &[u8]) -> [u8; 28] {
    let mut engine = Sha256State::new(H224_INIT);
    engine.update(input);

    let mut full = [0u8; 32];
    engine.finalize_into(&mut full);

    let mut out = [0u8; 28];
    out.copy_from_slice(&full[..28]);
    out
}
