//! Arbitrary-precision unsigned integer
//!
//! `BigUint` stores its value as little-endian 32-bit limbs in a `Vec`.
//! The representation is kept normalized (no high zero limbs, zero is the
//! empty vector), so limb count comparisons are meaningful.
//!
//! The value is wiped when dropped: big integers in this crate routinely
//! hold private exponents and prime factors.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter, LowerHex};

use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Default, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct BigUint {
    pub(crate) limbs: Vec<u32>,
}

impl BigUint {
    /// The value zero.
    pub const fn zero() -> Self {
        Self { limbs: Vec::new() }
    }

    /// The value one.
    pub fn one() -> Self {
        Self::from_u32(1)
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_limbs(vec![value])
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_limbs(vec![value as u32, (value >> 32) as u32])
    }

    /// Builds a value from little-endian limbs, normalizing them.
    pub(crate) fn from_limbs(limbs: Vec<u32>) -> Self {
        let mut out = Self { limbs };
        out.normalize();
        out
    }

    pub(crate) fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }

    /// Parses a big-endian byte string. Leading zero bytes are ignored.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len().div_ceil(4));

        for chunk in bytes.rchunks(4) {
            let mut word = [0u8; 4];
            word[4 - chunk.len()..].copy_from_slice(chunk);
            limbs.push(u32::from_be_bytes(word));
        }

        Self::from_limbs(limbs)
    }

    /// Minimal big-endian encoding. Zero encodes as an empty vector.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let len = self.bits().div_ceil(8);
        let mut out = vec![0u8; len];
        self.write_be(&mut out);
        out
    }

    /// Big-endian encoding left-padded to exactly `len` bytes.
    ///
    /// Returns `None` if the value needs more than `len` bytes.
    pub fn to_be_bytes_padded(&self, len: usize) -> Option<Vec<u8>> {
        if self.bits().div_ceil(8) > len {
            return None;
        }

        let mut out = vec![0u8; len];
        self.write_be(&mut out);
        Some(out)
    }

    /// Writes the low `out.len()` bytes of the value, big-endian.
    fn write_be(&self, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().rev().enumerate() {
            let limb = self.limbs.get(i / 4).copied().unwrap_or(0);
            *byte = (limb >> (8 * (i % 4))) as u8;
        }
    }

    /// Number of significant bits (`0` for zero).
    pub fn bits(&self) -> usize {
        match self.limbs.last() {
            Some(top) => self.limbs.len() * 32 - top.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Returns bit `index` (little-endian bit order).
    pub fn bit(&self, index: usize) -> bool {
        self.limbs
            .get(index / 32)
            .is_some_and(|limb| (limb >> (index % 32)) & 1 == 1)
    }

    /// Sets bit `index`, growing the value if needed.
    pub fn set_bit(&mut self, index: usize) {
        let limb = index / 32;
        if self.limbs.len() <= limb {
            self.limbs.resize(limb + 1, 0);
        }
        self.limbs[limb] |= 1 << (index % 32);
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.limbs.as_slice() == [1]
    }

    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|limb| limb & 1 == 1)
    }

    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Low 32 bits of the value.
    pub fn low_u32(&self) -> u32 {
        self.limbs.first().copied().unwrap_or(0)
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u32> for BigUint {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<u64> for BigUint {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl LowerHex for BigUint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.limbs.split_last() {
            None => f.write_str("0"),
            Some((top, rest)) => {
                write!(f, "{top:x}")?;
                for limb in rest.iter().rev() {
                    write!(f, "{limb:08x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Formats the value as lowercase hexadecimal without a prefix.
impl Display for BigUint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(self, f)
    }
}

/// Only the bit length is shown: values are frequently secret.
impl Debug for BigUint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BigUint({} bits)", self.bits())
    }
}
