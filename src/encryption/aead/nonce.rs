use super::NONCE_LEN;
use crate::error::{CryptoError, Result};
use crate::rng;

/// Deterministic nonce generator: a fixed 4-byte prefix followed by a
/// 64-bit big-endian counter.
///
/// Each value is handed out once. The sequence refuses to wrap, so a
/// single key can never see the same nonce twice through one sequence.
/// Distinct senders sharing a key must use distinct prefixes.
#[derive(Debug, Clone)]
pub struct NonceSequence {
    prefix: [u8; 4],
    next: Option<u64>,
}

impl NonceSequence {
    pub fn new(prefix: [u8; 4]) -> Self {
        Self::starting_at(prefix, 0)
    }

    /// Resumes a sequence, e.g. after persisting the last counter used.
    pub fn starting_at(prefix: [u8; 4], counter: u64) -> Self {
        Self {
            prefix,
            next: Some(counter),
        }
    }

    /// Returns the next nonce.
    ///
    /// # Errors
    /// `NonceExhausted` once all 2^64 counter values have been used.
    pub fn next_nonce(&mut self) -> Result<[u8; NONCE_LEN]> {
        let counter = self.next.ok_or(CryptoError::NonceExhausted)?;
        self.next = counter.checked_add(1);

        let mut nonce = [0u8; NONCE_LEN];
        nonce[..4].copy_from_slice(&self.prefix);
        nonce[4..].copy_from_slice(&counter.to_be_bytes());
        Ok(nonce)
    }

    /// Counter value the next call will use, if any remain.
    pub fn peek_counter(&self) -> Option<u64> {
        self.next
    }
}

/// Draws a nonce from the process-wide CSPRNG.
///
/// With 96 random bits, collisions become likely after about 2^48
/// messages under one key; prefer [`NonceSequence`] for long-lived keys.
///
/// # Errors
/// `EntropyUnavailable` if the generator could not be seeded.
pub fn random_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    rng::fill_random(&mut nonce)?;
    Ok(nonce)
}
