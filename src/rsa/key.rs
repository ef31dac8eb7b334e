use std::fmt;

use crate::error::{CryptoError, Result};
use crate::primitives::{BigUint, Montgomery};

use super::RsaLimits;

/// An assembled RSA key: modulus `n`, public exponent `e` and, for private
/// keys, the private exponent `d`.
///
/// Keys only come out of a validating constructor, so every `RsaKey`
/// satisfies:
/// - `n` is odd and at least 3
/// - `e` is odd with `1 < e < n`
/// - `d`, when present, satisfies `0 < d < n`
/// - no component is wider than the limits it was built with
///
/// `d` is wiped when the key is dropped.
#[derive(Clone)]
pub struct RsaKey {
    n: BigUint,
    e: BigUint,
    d: Option<BigUint>,
    mont: Montgomery,
}

impl RsaKey {
    /// Assembles a key from big-endian components under the default
    /// [`RsaLimits`].
    ///
    /// Passing `None` for `d` yields a public-only key.
    ///
    /// # Errors
    /// See [`RsaKey::from_components_with`].
    pub fn from_components(n: &[u8], e: &[u8], d: Option<&[u8]>) -> Result<Self> {
        Self::from_components_with(RsaLimits::default(), n, e, d)
    }

    /// Assembles a key from big-endian components under explicit limits.
    ///
    /// # Errors
    /// - `UnsupportedConfiguration` if `limits` is inconsistent
    /// - `KeyTooLarge` if any component is wider than `limits.max_bits`
    /// - `InvalidModulus` if `n` is even or below 3
    /// - `InvalidExponent` if `e` is even, `e <= 1`, `e >= n`, or `d` is
    ///   zero or not below `n`
    pub fn from_components_with(
        limits: RsaLimits,
        n: &[u8],
        e: &[u8],
        d: Option<&[u8]>,
    ) -> Result<Self> {
        Self::from_parts(
            limits,
            BigUint::from_be_bytes(n),
            BigUint::from_be_bytes(e),
            d.map(BigUint::from_be_bytes),
        )
    }

    pub(crate) fn from_parts(
        limits: RsaLimits,
        n: BigUint,
        e: BigUint,
        d: Option<BigUint>,
    ) -> Result<Self> {
        limits.validate()?;

        let widest = [Some(&n), Some(&e), d.as_ref()]
            .into_iter()
            .flatten()
            .map(BigUint::bits)
            .max()
            .unwrap_or(0);

        if widest > limits.max_bits {
            return Err(CryptoError::KeyTooLarge {
                bits: widest,
                max_bits: limits.max_bits,
            });
        }

        if n.is_even() || n < BigUint::from_u32(3) {
            return Err(CryptoError::InvalidModulus);
        }

        if e.is_even() || e <= BigUint::one() || e >= n {
            return Err(CryptoError::InvalidExponent);
        }

        if d.as_ref().is_some_and(|d| d.is_zero() || d >= &n) {
            return Err(CryptoError::InvalidExponent);
        }

        let mont = Montgomery::new(&n).ok_or(CryptoError::InvalidModulus)?;

        log::debug!(
            "rsa key assembled: {}-bit modulus, {}",
            n.bits(),
            if d.is_some() { "private" } else { "public" }
        );

        Ok(Self { n, e, d, mont })
    }

    /// Bit length of the modulus.
    pub fn modulus_bits(&self) -> usize {
        self.n.bits()
    }

    /// Modulus length in bytes; every transform output has this length.
    pub fn size(&self) -> usize {
        self.n.bits().div_ceil(8)
    }

    /// Big-endian modulus without leading zeros.
    pub fn modulus(&self) -> Vec<u8> {
        self.n.to_be_bytes()
    }

    /// Big-endian public exponent without leading zeros.
    pub fn public_exponent(&self) -> Vec<u8> {
        self.e.to_be_bytes()
    }

    pub fn has_private(&self) -> bool {
        self.d.is_some()
    }

    /// Returns a copy of this key without the private exponent.
    pub fn to_public(&self) -> RsaKey {
        RsaKey {
            n: self.n.clone(),
            e: self.e.clone(),
            d: None,
            mont: self.mont.clone(),
        }
    }

    /// Raw exponentiation: `input^d mod n` when the key is private,
    /// `input^e mod n` otherwise.
    ///
    /// # Errors
    /// `InputOutOfRange` if the big-endian input is not below `n`.
    pub fn raw_transform(&self, input: &[u8]) -> Result<Vec<u8>> {
        let exp = self.d.as_ref().unwrap_or(&self.e);
        self.transform(input, exp)
    }

    /// `input^e mod n`, regardless of whether `d` is present.
    ///
    /// # Errors
    /// `InputOutOfRange` if the input is not below `n`.
    pub fn public_transform(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.transform(input, &self.e)
    }

    /// `input^d mod n`.
    ///
    /// # Errors
    /// `MissingPrivateExponent` for a public-only key, `InputOutOfRange` if
    /// the input is not below `n`.
    pub fn private_transform(&self, input: &[u8]) -> Result<Vec<u8>> {
        let d = self.d.as_ref().ok_or(CryptoError::MissingPrivateExponent)?;
        self.transform(input, d)
    }

    fn transform(&self, input: &[u8], exp: &BigUint) -> Result<Vec<u8>> {
        let x = BigUint::from_be_bytes(input);
        if x >= self.n {
            return Err(CryptoError::InputOutOfRange);
        }

        let y = self.mont.pow(&x, exp).ok_or(CryptoError::InvalidModulus)?;
        y.to_be_bytes_padded(self.size())
            .ok_or(CryptoError::InputOutOfRange)
    }
}

impl fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKey")
            .field("modulus_bits", &self.modulus_bits())
            .field("e", &format_args!("{:x}", self.e))
            .field("private", &self.has_private())
            .finish()
    }
}
