use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::DigestAlgorithm;
use crate::secret::ConstantTimeEq;

/// Output of a hash or HMAC computation.
///
/// Stores up to 64 bytes inline together with the algorithm that produced
/// them. Equality is constant-time over the bytes.
///
/// HMAC uses a digest as key material for long keys, so the bytes are wiped
/// on drop and the type is not `Copy`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Digest {
    #[zeroize(skip)]
    algorithm: DigestAlgorithm,
    bytes: [u8; 64],
}

impl Digest {
    pub(crate) fn new(algorithm: DigestAlgorithm, bytes: &[u8]) -> Self {
        let mut out = [0u8; 64];
        out[..bytes.len()].copy_from_slice(bytes);

        Self {
            algorithm,
            bytes: out,
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.algorithm.output_len()]
    }

    pub fn len(&self) -> usize {
        self.algorithm.output_len()
    }

    /// Always `false`: every algorithm produces at least 16 bytes.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Lowercase hexadecimal encoding.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Eq for Digest {}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}:{})", self.algorithm, self)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}
