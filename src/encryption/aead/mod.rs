//! ChaCha20-Poly1305 authenticated encryption (RFC 8439).
//!
//! Two interfaces are provided:
//!
//! - [`AeadContext`]: streaming, with associated data and text supplied
//!   incrementally in strict phase order
//! - [`seal`] / [`open`]: one-shot helpers working on `ciphertext || tag`
//!
//! `(key, nonce)` pairs must never repeat. [`NonceSequence`] and
//! [`random_nonce`] help callers meet that requirement.

mod context;
mod nonce;

pub use context::{AeadContext, Phase};
pub use nonce::{NonceSequence, random_nonce};

use crate::encryption::poly1305::TAG_LEN;
use crate::error::{CryptoError, Result};

/// Key size in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce size in bytes.
pub const NONCE_LEN: usize = 12;

/// Longest message one nonce can cover: block counters 1 through
/// `2^32 - 1`, 64 bytes each.
pub const MAX_MESSAGE_LEN: u64 = (u32::MAX as u64) * 64;

/// Encrypts `plaintext` and returns `ciphertext || tag`.
///
/// # Errors
/// `InvalidKeyLength`, `InvalidNonceLength` or `MessageTooLong`.
pub fn seal(key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut ctx = AeadContext::new(key, nonce)?;
    ctx.associate(aad)?;

    let mut out = ctx.encrypt(plaintext)?;
    out.extend_from_slice(&ctx.finalize_encrypt()?);
    Ok(out)
}

/// Verifies and decrypts `ciphertext || tag`.
///
/// # Errors
/// `AuthenticationFailed` if the input is shorter than a tag or does not
/// verify; nothing is decrypted in that case.
pub fn open(key: &[u8], nonce: &[u8], aad: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    let mut ctx = AeadContext::new(key, nonce)?;

    let split = sealed
        .len()
        .checked_sub(TAG_LEN)
        .ok_or(CryptoError::AuthenticationFailed)?;
    let (ciphertext, tag) = sealed.split_at(split);

    let mut expected = [0u8; TAG_LEN];
    expected.copy_from_slice(tag);

    ctx.associate(aad)?;
    ctx.decrypt(ciphertext)?;
    ctx.finalize_decrypt(&expected)
}
