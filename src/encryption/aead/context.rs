use zeroize::Zeroize;

use crate::encryption::chacha20::{self, BLOCK_LEN};
use crate::encryption::poly1305::{Poly1305, TAG_LEN};
use crate::error::{CryptoError, Result};
use crate::secret::{ConstantTimeEq, SecretBytes, SecretVec};

use super::{KEY_LEN, MAX_MESSAGE_LEN, NONCE_LEN};

/// Where a context is in its lifecycle.
///
/// `Associating` is the initial phase. The first `encrypt` or `decrypt`
/// call commits the context to one direction; finalizing moves it to
/// `Finished`, from which nothing is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Associating,
    Encrypting,
    Decrypting,
    Finished,
}

/// Streaming ChaCha20-Poly1305 (RFC 8439) context.
///
/// Encryption output is released as it is produced. Decryption is
/// verify-then-release: ciphertext is buffered by [`AeadContext::decrypt`]
/// and plaintext only appears from [`AeadContext::finalize_decrypt`] once
/// the tag has been checked.
pub struct AeadContext {
    key: SecretBytes<KEY_LEN>,
    nonce: [u8; NONCE_LEN],
    mac: Option<Poly1305>,
    counter: u64,
    keystream: SecretBytes<BLOCK_LEN>,
    keystream_pos: usize,
    aad_len: u64,
    text_len: u64,
    pending: SecretVec,
    phase: Phase,
}

impl AeadContext {
    /// Creates a context for one message under `(key, nonce)`.
    ///
    /// # Errors
    /// `InvalidKeyLength` unless the key is 32 bytes, `InvalidNonceLength`
    /// unless the nonce is 12 bytes.
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: key.len(),
            });
        }
        if nonce.len() != NONCE_LEN {
            return Err(CryptoError::InvalidNonceLength {
                expected: NONCE_LEN,
                actual: nonce.len(),
            });
        }

        let key = SecretBytes::<KEY_LEN>::from_slice(key)?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(nonce);

        // Poly1305 one-time key: first half of keystream block 0.
        let mut block0 = chacha20::block(key.as_array(), 0, &nonce_bytes);
        let mut otk = [0u8; 32];
        otk.copy_from_slice(&block0[..32]);
        let mac = Poly1305::new(&otk);
        block0.zeroize();
        otk.zeroize();

        log::trace!("aead context created");

        Ok(Self {
            key,
            nonce: nonce_bytes,
            mac: Some(mac),
            counter: 1,
            keystream: SecretBytes::zeroed(BLOCK_LEN)?,
            keystream_pos: BLOCK_LEN,
            aad_len: 0,
            text_len: 0,
            pending: SecretVec::new(),
            phase: Phase::Associating,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn mac(&mut self) -> Result<&mut Poly1305> {
        self.mac.as_mut().ok_or(CryptoError::PhaseError)
    }

    /// Adds associated data. Allowed only before the first text call.
    ///
    /// # Errors
    /// `PhaseError` once encryption or decryption has started.
    pub fn associate(&mut self, aad: &[u8]) -> Result<()> {
        if self.phase != Phase::Associating {
            return Err(CryptoError::PhaseError);
        }

        self.mac()?.update(aad);
        self.aad_len += aad.len() as u64;
        Ok(())
    }

    /// Moves from `Associating` into `target`, closing the AAD section.
    fn enter(&mut self, target: Phase) -> Result<()> {
        match self.phase {
            Phase::Associating => {
                self.mac()?.pad_to_block();
                self.phase = target;
                Ok(())
            }
            current if current == target => Ok(()),
            _ => Err(CryptoError::PhaseError),
        }
    }

    fn reserve(&mut self, len: usize) -> Result<()> {
        let total = self.text_len.saturating_add(len as u64);
        if total > MAX_MESSAGE_LEN {
            return Err(CryptoError::MessageTooLong);
        }

        self.text_len = total;
        Ok(())
    }

    /// XORs `data` with the keystream, continuing across calls.
    fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            if self.keystream_pos == BLOCK_LEN {
                // `reserve` bounds the text so every block used has a 32-bit counter.
                debug_assert!(self.counter <= u64::from(u32::MAX));
                let mut block =
                    chacha20::block(self.key.as_array(), self.counter as u32, &self.nonce);
                self.keystream.as_mut_bytes().copy_from_slice(&block);
                block.zeroize();
                self.counter += 1;
                self.keystream_pos = 0;
            }

            *byte ^= self.keystream.as_bytes()[self.keystream_pos];
            self.keystream_pos += 1;
        }
    }

    /// Encrypts a chunk of plaintext and returns the ciphertext chunk.
    ///
    /// # Errors
    /// `PhaseError` after decryption started or after finalization,
    /// `MessageTooLong` past the 32-bit block counter.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.enter(Phase::Encrypting)?;
        self.reserve(plaintext.len())?;

        let mut out = plaintext.to_vec();
        self.apply_keystream(&mut out);
        self.mac()?.update(&out);

        Ok(out)
    }

    fn tag(&mut self) -> Result<[u8; TAG_LEN]> {
        let mut mac = self.mac.take().ok_or(CryptoError::PhaseError)?;

        mac.pad_to_block();
        mac.update(&self.aad_len.to_le_bytes());
        mac.update(&self.text_len.to_le_bytes());

        Ok(mac.finalize())
    }

    /// Closes the message and returns the 16-byte tag.
    ///
    /// # Errors
    /// `PhaseError` if the context is decrypting or already finished.
    pub fn finalize_encrypt(&mut self) -> Result<[u8; TAG_LEN]> {
        self.enter(Phase::Encrypting)?;

        let tag = self.tag()?;
        self.finish();
        Ok(tag)
    }

    /// Absorbs a chunk of ciphertext. No plaintext is returned here.
    ///
    /// # Errors
    /// `PhaseError` after encryption started or after finalization,
    /// `MessageTooLong` past the 32-bit block counter.
    pub fn decrypt(&mut self, ciphertext: &[u8]) -> Result<()> {
        self.enter(Phase::Decrypting)?;
        self.reserve(ciphertext.len())?;

        self.mac()?.update(ciphertext);
        self.pending.extend_from_slice(ciphertext);
        Ok(())
    }

    /// Verifies `expected_tag` and, only on success, returns the plaintext.
    ///
    /// # Errors
    /// `AuthenticationFailed` on tag mismatch; the buffered data is wiped
    /// and nothing is released. `PhaseError` if the context is encrypting
    /// or already finished.
    pub fn finalize_decrypt(&mut self, expected_tag: &[u8; TAG_LEN]) -> Result<Vec<u8>> {
        self.enter(Phase::Decrypting)?;

        let mut computed = self.tag()?;
        let valid = computed.ct_eq(expected_tag);
        computed.zeroize();

        if !valid {
            log::warn!("aead tag verification failed");
            self.finish();
            return Err(CryptoError::AuthenticationFailed);
        }

        let mut plaintext = std::mem::take(&mut self.pending).into_vec();
        self.apply_keystream(&mut plaintext);
        self.finish();

        Ok(plaintext)
    }

    fn finish(&mut self) {
        self.mac = None;
        self.pending.zeroize();
        self.keystream.zeroize();
        self.phase = Phase::Finished;
    }
}
