use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, Result};

/// Fixed-capacity secret buffer.
///
/// Holds up to `N` bytes inline. The whole backing array (not only the used
/// prefix) is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> SecretBytes<N> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            bytes: [0u8; N],
            len: 0,
        }
    }

    /// Creates a zero-filled buffer of `len` bytes.
    ///
    /// # Errors
    /// `InvalidKeyLength` if `len > N`.
    pub fn zeroed(len: usize) -> Result<Self> {
        if len > N {
            return Err(CryptoError::InvalidKeyLength {
                expected: N,
                actual: len,
            });
        }

        Ok(Self {
            bytes: [0u8; N],
            len,
        })
    }

    /// Copies `data` into a new buffer.
    ///
    /// # Errors
    /// `InvalidKeyLength` if `data` is longer than the capacity.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let mut out = Self::zeroed(data.len())?;
        out.bytes[..data.len()].copy_from_slice(data);
        Ok(out)
    }

    /// Returns the used portion of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns the used portion of the buffer, mutably.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }

    /// Returns the full backing array, including unused trailing zeros.
    pub fn as_array(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SecretBytes<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>([REDACTED; {}])", self.len)
    }
}

/// Growable secret buffer backed by a `Vec<u8>`.
///
/// Capacity should be reserved up front where the final size is known:
/// a reallocation leaves the previous allocation behind unwiped.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretVec(Vec<u8>);

impl SecretVec {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.0.extend_from_slice(data);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Releases the contents to the caller, who becomes responsible for them.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

impl From<Vec<u8>> for SecretVec {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for SecretVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretVec([REDACTED; {}])", self.0.len())
    }
}
