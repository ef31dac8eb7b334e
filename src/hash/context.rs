use super::sha256::{H224_INIT, H256_INIT, Sha256State};
use super::sha512::{H384_INIT, H512_INIT, Sha512State};
use zeroize::Zeroize;

use super::{Digest, DigestAlgorithm};
use crate::error::{CryptoError, Result};

#[cfg(feature = "legacy")]
use super::md5::Md5State;
#[cfg(feature = "legacy")]
use super::sha1::Sha1State;

/// Per-algorithm running state.
#[derive(Clone)]
enum Engine {
    #[cfg(feature = "legacy")]
    Md5(Md5State),
    #[cfg(feature = "legacy")]
    Sha1(Sha1State),
    Sha224(Sha256State),
    Sha256(Sha256State),
    Sha384(Sha512State),
    Sha512(Sha512State),
}

impl Engine {
    fn new(algorithm: DigestAlgorithm) -> Result<Self> {
        Ok(match algorithm {
            #[cfg(feature = "legacy")]
            DigestAlgorithm::Md5 => Self::Md5(Md5State::new()),
            #[cfg(feature = "legacy")]
            DigestAlgorithm::Sha1 => Self::Sha1(Sha1State::new()),
            DigestAlgorithm::Sha224 => Self::Sha224(Sha256State::new(H224_INIT)),
            DigestAlgorithm::Sha256 => Self::Sha256(Sha256State::new(H256_INIT)),
            DigestAlgorithm::Sha384 => Self::Sha384(Sha512State::new(H384_INIT)),
            DigestAlgorithm::Sha512 => Self::Sha512(Sha512State::new(H512_INIT)),
            #[allow(unreachable_patterns)]
            _ => return Err(CryptoError::UnsupportedAlgorithm),
        })
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            #[cfg(feature = "legacy")]
            Self::Md5(s) => s.update(data),
            #[cfg(feature = "legacy")]
            Self::Sha1(s) => s.update(data),
            Self::Sha224(s) | Self::Sha256(s) => s.update(data),
            Self::Sha384(s) | Self::Sha512(s) => s.update(data),
        }
    }

    /// Writes the untruncated output; callers slice to `output_len`.
    fn finalize_into(&mut self, out: &mut [u8; 64]) {
        match self {
            #[cfg(feature = "legacy")]
            Self::Md5(s) => {
                let mut buf = [0u8; 16];
                s.finalize_into(&mut buf);
                out[..16].copy_from_slice(&buf);
            }
            #[cfg(feature = "legacy")]
            Self::Sha1(s) => {
                let mut buf = [0u8; 20];
                s.finalize_into(&mut buf);
                out[..20].copy_from_slice(&buf);
            }
            Self::Sha224(s) | Self::Sha256(s) => {
                let mut buf = [0u8; 32];
                s.finalize_into(&mut buf);
                out[..32].copy_from_slice(&buf);
            }
            Self::Sha384(s) | Self::Sha512(s) => s.finalize_into(out),
        }
    }
}

/// Streaming hash computation.
///
/// ```
/// use opencrypto::hash::{DigestAlgorithm, HashContext};
///
/// let mut ctx = HashContext::new(DigestAlgorithm::Sha256)?;
/// ctx.update(b"a")?;
/// ctx.update(b"bc")?;
/// let digest = ctx.finalize()?;
///
/// assert_eq!(
///     digest.to_hex(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// # Ok::<(), opencrypto::CryptoError>(())
/// ```
///
/// Finalization is one-shot: afterwards `update` and `finalize` fail with
/// `ContextFinalized` until [`HashContext::reset`] is called.
#[derive(Clone)]
pub struct HashContext {
    algorithm: DigestAlgorithm,
    engine: Engine,
    finalized: bool,
}

impl HashContext {
    /// Creates a fresh context.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the algorithm is compiled out.
    pub fn new(algorithm: DigestAlgorithm) -> Result<Self> {
        let engine = Engine::new(algorithm).inspect_err(|_| {
            log::debug!("hash context for {algorithm} unavailable in this build");
        })?;

        log::trace!("hash context created for {algorithm}");

        Ok(Self {
            algorithm,
            engine,
            finalized: false,
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Absorbs `data`. May be called any number of times.
    ///
    /// # Errors
    /// `ContextFinalized` after [`HashContext::finalize`].
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(CryptoError::ContextFinalized);
        }

        self.engine.update(data);
        Ok(())
    }

    /// Pads the message, returns the digest and makes the context terminal.
    ///
    /// # Errors
    /// `ContextFinalized` if called twice.
    pub fn finalize(&mut self) -> Result<Digest> {
        if self.finalized {
            return Err(CryptoError::ContextFinalized);
        }

        let mut out = [0u8; 64];
        self.engine.finalize_into(&mut out);
        self.finalized = true;

        let digest = Digest::new(self.algorithm, &out[..self.algorithm.output_len()]);
        out.zeroize();

        Ok(digest)
    }

    /// Returns the context to its freshly created state.
    pub fn reset(&mut self) {
        // `new` only fails for compiled-out algorithms, and this context
        // already exists, so the algorithm is available.
        if let Ok(engine) = Engine::new(self.algorithm) {
            self.engine = engine;
        }
        self.finalized = false;
    }
}

/// One-shot digest of `data`.
///
/// # Errors
/// `UnsupportedAlgorithm` if the algorithm is compiled out.
pub fn digest(algorithm: DigestAlgorithm, data: &[u8]) -> Result<Digest> {
    let mut ctx = HashContext::new(algorithm)?;
    ctx.update(data)?;
    ctx.finalize()
}
