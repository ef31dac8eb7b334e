//! PKCS#1 v1.5 padding (RFC 8017).
//!
//! Signatures (RSASSA, §8.2): the encoded message is
//! `00 01 FF..FF 00 || DigestInfo`, where `DigestInfo` is the DER prefix for
//! the hash followed by the digest. Verification re-encodes the expected
//! message and compares it with the recovered one in constant time; no
//! ASN.1 is parsed.
//!
//! Encryption (RSAES, §7.2): the block is `00 02 PS 00 || M` with `PS` at
//! least eight random nonzero bytes. Decryption checks the whole block
//! without data-dependent branches and reports every failure as
//! `DecryptionFailed`.

use std::hint::black_box;

use zeroize::Zeroize;

use crate::error::{CryptoError, Result};
use crate::hash::{self, DigestAlgorithm};
use crate::rng::{self, Csprng};
use crate::secret::ConstantTimeEq;

use super::RsaKey;

/// `00 02` header, eight bytes of minimum padding and the `00` separator.
const ENCRYPTION_OVERHEAD: usize = 11;

/// DER-encoded `DigestInfo` header for each hash (RFC 8017 §9.2 note 1).
fn digest_info_prefix(algorithm: DigestAlgorithm) -> &'static [u8] {
    match algorithm {
        DigestAlgorithm::Md5 => &[
            0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x05,
            0x05, 0x00, 0x04, 0x10,
        ],
        DigestAlgorithm::Sha1 => &[
            0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04,
            0x14,
        ],
        DigestAlgorithm::Sha224 => &[
            0x30, 0x2d, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x04, 0x05, 0x00, 0x04, 0x1c,
        ],
        DigestAlgorithm::Sha256 => &[
            0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x01, 0x05, 0x00, 0x04, 0x20,
        ],
        DigestAlgorithm::Sha384 => &[
            0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x02, 0x05, 0x00, 0x04, 0x30,
        ],
        DigestAlgorithm::Sha512 => &[
            0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02,
            0x03, 0x05, 0x00, 0x04, 0x40,
        ],
    }
}

/// EMSA-PKCS1-v1_5 encoding of an already computed digest.
fn encode(algorithm: DigestAlgorithm, digest: &[u8], em_len: usize) -> Result<Vec<u8>> {
    if digest.len() != algorithm.output_len() {
        return Err(CryptoError::InputOutOfRange);
    }

    let prefix = digest_info_prefix(algorithm);
    let t_len = prefix.len() + digest.len();

    // At least eight bytes of 0xff padding.
    if em_len < t_len + 11 {
        return Err(CryptoError::InvalidKeySize(em_len * 8));
    }

    let mut em = Vec::with_capacity(em_len);
    em.extend_from_slice(&[0x00, 0x01]);
    em.resize(em_len - t_len - 1, 0xff);
    em.push(0x00);
    em.extend_from_slice(prefix);
    em.extend_from_slice(digest);

    Ok(em)
}

/// Hashes `message` with `algorithm` and signs the digest.
///
/// # Errors
/// See [`sign_digest`]; also `UnsupportedAlgorithm` if the hash is
/// compiled out.
pub fn sign(key: &RsaKey, algorithm: DigestAlgorithm, message: &[u8]) -> Result<Vec<u8>> {
    let digest = hash::digest(algorithm, message)?;
    sign_digest(key, algorithm, digest.as_bytes())
}

/// Signs a precomputed digest.
///
/// # Errors
/// - `MissingPrivateExponent` for a public-only key
/// - `InputOutOfRange` if `digest` is not `algorithm.output_len()` bytes
/// - `InvalidKeySize` if the modulus is too small for the encoding
pub fn sign_digest(key: &RsaKey, algorithm: DigestAlgorithm, digest: &[u8]) -> Result<Vec<u8>> {
    if !key.has_private() {
        return Err(CryptoError::MissingPrivateExponent);
    }

    let em = encode(algorithm, digest, key.size())?;
    let signature = key.private_transform(&em)?;

    log::trace!("pkcs1 signature produced with {algorithm}");
    Ok(signature)
}

/// Verifies `signature` over `message`.
///
/// # Errors
/// `InvalidSignature` if verification fails for any reason,
/// `UnsupportedAlgorithm` if the hash is compiled out.
pub fn verify(
    key: &RsaKey,
    algorithm: DigestAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let digest = hash::digest(algorithm, message)?;
    verify_digest(key, algorithm, digest.as_bytes(), signature)
}

/// Verifies `signature` over a precomputed digest.
///
/// # Errors
/// `InvalidSignature` on a wrong signature length, a signature not below
/// the modulus, a malformed digest or an encoding mismatch.
pub fn verify_digest(
    key: &RsaKey,
    algorithm: DigestAlgorithm,
    digest: &[u8],
    signature: &[u8],
) -> Result<()> {
    if signature.len() != key.size() {
        return Err(CryptoError::InvalidSignature);
    }

    let recovered = key
        .public_transform(signature)
        .map_err(|_| CryptoError::InvalidSignature)?;
    let expected =
        encode(algorithm, digest, key.size()).map_err(|_| CryptoError::InvalidSignature)?;

    if !recovered.ct_eq(&expected) {
        log::warn!("pkcs1 signature verification failed");
        return Err(CryptoError::InvalidSignature);
    }

    Ok(())
}

/// Encrypts `message` to `key` with random padding from the process-wide
/// generator.
///
/// # Errors
/// - `MessageTooLong` if `message` is longer than `key.size() - 11` bytes
/// - `InvalidKeySize` if the modulus cannot hold any padded block
/// - `EntropyUnavailable` if the generator could not be seeded
pub fn encrypt(key: &RsaKey, message: &[u8]) -> Result<Vec<u8>> {
    encrypt_padded(key, message, rng::fill_random)
}

/// Like [`encrypt`], drawing the padding from a caller-owned generator.
///
/// # Errors
/// See [`encrypt`].
pub fn encrypt_with(key: &RsaKey, message: &[u8], rng: &mut Csprng) -> Result<Vec<u8>> {
    encrypt_padded(key, message, |buf| {
        rng.fill_bytes(buf);
        Ok(())
    })
}

fn encrypt_padded<F>(key: &RsaKey, message: &[u8], mut fill: F) -> Result<Vec<u8>>
where
    F: FnMut(&mut [u8]) -> Result<()>,
{
    let k = key.size();
    if k <= ENCRYPTION_OVERHEAD {
        return Err(CryptoError::InvalidKeySize(key.modulus_bits()));
    }
    if message.len() > k - ENCRYPTION_OVERHEAD {
        return Err(CryptoError::MessageTooLong);
    }

    let ps_len = k - message.len() - 3;
    let mut em = vec![0u8; k];
    em[1] = 0x02;
    fill_nonzero(&mut em[2..2 + ps_len], &mut fill)?;
    em[k - message.len()..].copy_from_slice(message);

    // The leading zero byte keeps `em` below the modulus.
    let ciphertext = key.public_transform(&em);
    em.zeroize();

    ciphertext
}

/// Fills `out` with random bytes, redrawing any zero byte.
fn fill_nonzero<F>(out: &mut [u8], fill: &mut F) -> Result<()>
where
    F: FnMut(&mut [u8]) -> Result<()>,
{
    fill(out)?;

    let mut spare = [0u8; 1];
    for byte in out.iter_mut() {
        while *byte == 0 {
            fill(&mut spare)?;
            *byte = spare[0];
        }
    }

    spare.zeroize();
    Ok(())
}

/// Decrypts a PKCS#1 v1.5 ciphertext with the private key.
///
/// # Errors
/// - `MissingPrivateExponent` for a public-only key
/// - `DecryptionFailed` for a ciphertext of the wrong length, one not below
///   the modulus, or a block with bad padding; the causes are not
///   distinguished
pub fn decrypt(key: &RsaKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    if !key.has_private() {
        return Err(CryptoError::MissingPrivateExponent);
    }

    let k = key.size();
    if k <= ENCRYPTION_OVERHEAD || ciphertext.len() != k {
        return Err(CryptoError::DecryptionFailed);
    }

    let mut em = key
        .private_transform(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    let start = unpad(&em);
    let message = start.map(|start| em[start..].to_vec());
    em.zeroize();

    message.ok_or_else(|| {
        log::warn!("pkcs1 decryption failed");
        CryptoError::DecryptionFailed
    })
}

/// `0xff` if `x == 0`, `0x00` otherwise.
#[inline]
fn zero_mask(x: u8) -> u8 {
    ((u32::from(black_box(x)).wrapping_sub(1)) >> 24) as u8
}

/// Locates the message inside a decrypted block.
///
/// Every byte is inspected whatever the content; only the final verdict
/// branches.
fn unpad(em: &[u8]) -> Option<usize> {
    let mut good = zero_mask(em[0]) & zero_mask(em[1] ^ 0x02);

    let mut looking = 0xffu8;
    let mut separator = 0usize;
    for (i, &byte) in em.iter().enumerate().skip(2) {
        let found = looking & zero_mask(byte);
        let mask = usize::from(found & 1).wrapping_neg();
        separator = (i & mask) | (separator & !mask);
        looking &= !zero_mask(byte);
    }

    // A separator exists and at least eight padding bytes precede it.
    let short_padding =
        (separator.wrapping_sub(ENCRYPTION_OVERHEAD - 1) >> (usize::BITS - 1)) as u8;
    good &= !looking;
    good &= short_padding.wrapping_sub(1);

    if black_box(good) == 0xff {
        Some(separator + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lengths_match_der_headers() {
        for alg in DigestAlgorithm::ALL {
            let prefix = digest_info_prefix(alg);
            // outer SEQUENCE length covers the rest of the DigestInfo
            assert_eq!(prefix[1] as usize, prefix.len() - 2 + alg.output_len());
            assert_eq!(*prefix.last().unwrap() as usize, alg.output_len());
        }
    }

    #[test]
    fn encoding_layout() {
        let digest = [0xabu8; 32];
        let em = encode(DigestAlgorithm::Sha256, &digest, 64).unwrap();

        assert_eq!(em.len(), 64);
        assert_eq!(&em[..2], &[0x00, 0x01]);
        let ps_end = 64 - 19 - 32 - 1;
        assert!(em[2..ps_end].iter().all(|&b| b == 0xff));
        assert_eq!(em[ps_end], 0x00);
        assert_eq!(&em[64 - 32..], &digest);
    }

    #[test]
    fn encoding_rejects_short_modulus() {
        let digest = [0u8; 64];
        assert_eq!(
            encode(DigestAlgorithm::Sha512, &digest, 64).unwrap_err(),
            CryptoError::InvalidKeySize(512)
        );
    }

    #[test]
    fn encoding_rejects_wrong_digest_length() {
        assert_eq!(
            encode(DigestAlgorithm::Sha256, &[0u8; 20], 128).unwrap_err(),
            CryptoError::InputOutOfRange
        );
    }

    /// `00 02 || padding || 00 || message`
    fn block(padding: &[u8], message: &[u8]) -> Vec<u8> {
        let mut em = vec![0x00, 0x02];
        em.extend_from_slice(padding);
        em.push(0x00);
        em.extend_from_slice(message);
        em
    }

    #[test]
    fn zero_mask_is_exact() {
        assert_eq!(zero_mask(0), 0xff);
        for x in 1..=255u8 {
            assert_eq!(zero_mask(x), 0, "{x}");
        }
    }

    #[test]
    fn unpad_finds_the_first_separator() {
        let em = block(&[1, 2, 3, 4, 5, 6, 7, 8], &[b'h', 0, b'i']);
        assert_eq!(unpad(&em), Some(11));
    }

    #[test]
    fn unpad_accepts_an_empty_message() {
        let em = block(&[9; 8], &[]);
        assert_eq!(unpad(&em), Some(em.len()));
    }

    #[test]
    fn unpad_rejects_malformed_blocks() {
        // seven padding bytes
        assert_eq!(unpad(&block(&[1, 2, 3, 4, 5, 6, 7], b"x")), None);
        // no separator
        let mut em = vec![0x00, 0x02];
        em.extend_from_slice(&[0xaa; 20]);
        assert_eq!(unpad(&em), None);
        // signature block type
        let mut em = block(&[0xff; 8], b"x");
        em[1] = 0x01;
        assert_eq!(unpad(&em), None);
        // nonzero leading byte
        em[1] = 0x02;
        em[0] = 0x01;
        assert_eq!(unpad(&em), None);
    }

    #[test]
    fn padding_bytes_are_never_zero() {
        let mut calls = 0;
        let mut out = [0u8; 16];
        // First draw is all zeros, every redraw returns 7.
        fill_nonzero(&mut out, &mut |buf: &mut [u8]| {
            let value = if calls == 0 { 0 } else { 7 };
            calls += 1;
            buf.fill(value);
            Ok(())
        })
        .unwrap();

        assert_eq!(out, [7u8; 16]);
        assert_eq!(calls, 17);
    }
}
