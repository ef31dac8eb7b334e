use crate::error::{CryptoError, Result};
use crate::hash::{Digest, DigestAlgorithm, HashContext, digest};
use crate::secret::{SecretBytes, ct_eq};

/// Largest block size among the supported hashes (SHA-384/512).
const MAX_BLOCK_LEN: usize = 128;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Streaming HMAC computation.
///
/// The context keeps both padded keys so it can be [`reset`](Self::reset)
/// and reused with the same key. Both pads are wiped on drop.
pub struct HmacContext {
    algorithm: DigestAlgorithm,
    inner: HashContext,
    inner_pad: SecretBytes<MAX_BLOCK_LEN>,
    outer_pad: SecretBytes<MAX_BLOCK_LEN>,
    finalized: bool,
}

impl HmacContext {
    /// Derives the pads from `key` and primes the inner hash.
    ///
    /// Keys longer than the block size are hashed first; shorter keys are
    /// zero-padded. Any key length, including zero, is accepted.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the hash is compiled out.
    pub fn new(algorithm: DigestAlgorithm, key: &[u8]) -> Result<Self> {
        let block_len = algorithm.block_len();

        let mut key_block = SecretBytes::<MAX_BLOCK_LEN>::zeroed(block_len)?;
        if key.len() > block_len {
            let hashed = digest(algorithm, key)?;
            key_block.as_mut_bytes()[..hashed.len()].copy_from_slice(hashed.as_bytes());
        } else {
            key_block.as_mut_bytes()[..key.len()].copy_from_slice(key);
        }

        let mut inner_pad = SecretBytes::<MAX_BLOCK_LEN>::zeroed(block_len)?;
        let mut outer_pad = SecretBytes::<MAX_BLOCK_LEN>::zeroed(block_len)?;

        for ((i, o), k) in inner_pad
            .as_mut_bytes()
            .iter_mut()
            .zip(outer_pad.as_mut_bytes().iter_mut())
            .zip(key_block.as_bytes())
        {
            *i = k ^ IPAD;
            *o = k ^ OPAD;
        }

        let mut inner = HashContext::new(algorithm)?;
        inner.update(inner_pad.as_bytes())?;

        log::trace!("hmac context created for {algorithm}");

        Ok(Self {
            algorithm,
            inner,
            inner_pad,
            outer_pad,
            finalized: false,
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Absorbs message data.
    ///
    /// # Errors
    /// `ContextFinalized` after [`HmacContext::finalize`].
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(CryptoError::ContextFinalized);
        }

        self.inner.update(data)
    }

    /// Computes `H(opad || H(ipad || message))` and makes the context
    /// terminal.
    ///
    /// # Errors
    /// `ContextFinalized` if called twice.
    pub fn finalize(&mut self) -> Result<Digest> {
        if self.finalized {
            return Err(CryptoError::ContextFinalized);
        }

        let inner_digest = self.inner.finalize()?;

        let mut outer = HashContext::new(self.algorithm)?;
        outer.update(self.outer_pad.as_bytes())?;
        outer.update(inner_digest.as_bytes())?;

        self.finalized = true;
        outer.finalize()
    }

    /// Finalizes and compares the tag against `expected` in constant time.
    ///
    /// # Errors
    /// `AuthenticationFailed` on mismatch (including a length mismatch),
    /// `ContextFinalized` if the context was already finalized.
    pub fn verify(&mut self, expected: &[u8]) -> Result<()> {
        let tag = self.finalize()?;

        if ct_eq(tag.as_bytes(), expected) {
            Ok(())
        } else {
            log::warn!("hmac-{} verification failed", self.algorithm);
            Err(CryptoError::AuthenticationFailed)
        }
    }

    /// Restarts the computation with the same key.
    pub fn reset(&mut self) {
        self.inner.reset();
        // A freshly reset context is never finalized.
        let _ = self.inner.update(self.inner_pad.as_bytes());
        self.finalized = false;
    }
}

/// One-shot HMAC of `message` under `key`.
///
/// # Errors
/// `UnsupportedAlgorithm` if the hash is compiled out.
pub fn hmac(algorithm: DigestAlgorithm, key: &[u8], message: &[u8]) -> Result<Digest> {
    let mut ctx = HmacContext::new(algorithm, key)?;
    ctx.update(message)?;
    ctx.finalize()
}

/// One-shot verification of an HMAC tag.
///
/// # Errors
/// `AuthenticationFailed` if `tag` does not match.
pub fn verify(algorithm: DigestAlgorithm, key: &[u8], message: &[u8], tag: &[u8]) -> Result<()> {
    let mut ctx = HmacContext::new(algorithm, key)?;
    ctx.update(message)?;
    ctx.verify(tag)
}
