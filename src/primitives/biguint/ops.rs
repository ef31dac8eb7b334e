//! Arithmetic for `BigUint`
//!
//! Only the operations RSA needs are provided: addition, checked
//! subtraction, schoolbook multiplication, shifts, long division and
//! modular inversion. Operator traits are implemented on references so
//! large values are never copied implicitly.
//!
//! None of these routines are constant-time. Secret-dependent
//! exponentiation goes through [`super::Montgomery`] instead.

use std::ops::{Add, Mul, Shl, Shr};

use zeroize::Zeroize;

use super::BigUint;

impl BigUint {
    /// Returns `self - rhs`, or `None` if `rhs > self`.
    pub fn checked_sub(&self, rhs: &BigUint) -> Option<BigUint> {
        if self < rhs {
            return None;
        }

        let mut limbs = self.limbs.clone();
        sub_assign(&mut limbs, &rhs.limbs);
        Some(BigUint::from_limbs(limbs))
    }

    /// Euclidean division. Returns `None` for a zero divisor.
    pub fn div_rem(&self, divisor: &BigUint) -> Option<(BigUint, BigUint)> {
        if divisor.is_zero() {
            return None;
        }
        if self < divisor {
            return Some((BigUint::zero(), self.clone()));
        }
        if divisor.limbs.len() == 1 {
            let (q, r) = self.div_rem_u32(divisor.limbs[0]);
            return Some((q, BigUint::from_u32(r)));
        }

        // Bitwise restoring division on a fixed-width remainder.
        let width = divisor.limbs.len() + 1;
        let mut rem = vec![0u32; width];
        let mut quotient = vec![0u32; self.limbs.len()];

        for i in (0..self.bits()).rev() {
            shl1_assign(&mut rem, self.bit(i));

            if cmp_limbs(&rem, &divisor.limbs).is_ge() {
                sub_assign(&mut rem, &divisor.limbs);
                quotient[i / 32] |= 1 << (i % 32);
            }
        }

        let out = (BigUint::from_limbs(quotient), BigUint::from_limbs(rem.clone()));
        rem.zeroize();
        Some(out)
    }

    /// Divides by a single limb. `divisor` must be nonzero.
    fn div_rem_u32(&self, divisor: u32) -> (BigUint, u32) {
        let mut quotient = vec![0u32; self.limbs.len()];
        let mut rem = 0u64;

        for (i, limb) in self.limbs.iter().enumerate().rev() {
            let cur = (rem << 32) | *limb as u64;
            quotient[i] = (cur / divisor as u64) as u32;
            rem = cur % divisor as u64;
        }

        (BigUint::from_limbs(quotient), rem as u32)
    }

    /// Remainder modulo a small value. Returns `None` for a zero modulus.
    pub fn rem_u32(&self, modulus: u32) -> Option<u32> {
        if modulus == 0 {
            return None;
        }

        let rem = self
            .limbs
            .iter()
            .rev()
            .fold(0u64, |rem, limb| ((rem << 32) | *limb as u64) % modulus as u64);

        Some(rem as u32)
    }

    /// Reduces `self` modulo `modulus`. Returns `None` for a zero modulus.
    pub fn rem(&self, modulus: &BigUint) -> Option<BigUint> {
        self.div_rem(modulus).map(|(_, r)| r)
    }

    /// Inverse of `self` modulo `modulus`, if it exists.
    ///
    /// Extended Euclid with the Bézout coefficient kept reduced modulo
    /// `modulus`, so no signed arithmetic is needed.
    pub fn mod_inverse(&self, modulus: &BigUint) -> Option<BigUint> {
        if modulus.is_zero() || modulus.is_one() {
            return None;
        }

        let mut r0 = modulus.clone();
        let mut r1 = self.rem(modulus)?;
        let mut t0 = BigUint::zero();
        let mut t1 = BigUint::one();

        while !r1.is_zero() {
            let (q, r2) = r0.div_rem(&r1)?;

            // t2 = t0 - q * t1 (mod modulus)
            let qt = (&q * &t1).rem(modulus)?;
            let t2 = if t0 >= qt {
                t0.checked_sub(&qt)?
            } else {
                (&t0 + modulus).checked_sub(&qt)?
            };

            r0 = r1;
            r1 = r2;
            t0 = t1;
            t1 = t2;
        }

        r0.is_one().then_some(t0)
    }
}

/// `a -= b` in place. Requires `a >= b` and `a.len() >= b.len()`.
pub(crate) fn sub_assign(a: &mut [u32], b: &[u32]) {
    let mut borrow = 0u64;

    for (i, limb) in a.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0) as u64 + borrow;
        let lhs = *limb as u64;

        if lhs >= rhs {
            *limb = (lhs - rhs) as u32;
            borrow = 0;
        } else {
            *limb = ((1u64 << 32) + lhs - rhs) as u32;
            borrow = 1;
        }
    }
}

/// Shifts `a` left by one bit and sets bit 0 to `low`. Overflow is dropped.
fn shl1_assign(a: &mut [u32], low: bool) {
    let mut carry = low as u32;

    for limb in a.iter_mut() {
        let next = *limb >> 31;
        *limb = (*limb << 1) | carry;
        carry = next;
    }
}

/// Compares unnormalized little-endian limb slices of any length.
fn cmp_limbs(a: &[u32], b: &[u32]) -> std::cmp::Ordering {
    let len = a.len().max(b.len());

    (0..len)
        .rev()
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(std::cmp::Ordering::Equal)
}

impl Add<&BigUint> for &BigUint {
    type Output = BigUint;

    fn add(self, rhs: &BigUint) -> BigUint {
        let len = self.limbs.len().max(rhs.limbs.len());
        let mut out = Vec::with_capacity(len + 1);
        let mut carry = 0u64;

        for i in 0..len {
            let a = self.limbs.get(i).copied().unwrap_or(0) as u64;
            let b = rhs.limbs.get(i).copied().unwrap_or(0) as u64;
            let sum = a + b + carry;
            out.push(sum as u32);
            carry = sum >> 32;
        }
        out.push(carry as u32);

        BigUint::from_limbs(out)
    }
}

/// Schoolbook multiplication.
impl Mul<&BigUint> for &BigUint {
    type Output = BigUint;

    fn mul(self, rhs: &BigUint) -> BigUint {
        if self.is_zero() || rhs.is_zero() {
            return BigUint::zero();
        }

        let mut out = vec![0u32; self.limbs.len() + rhs.limbs.len()];

        for (i, a) in self.limbs.iter().enumerate() {
            let mut carry = 0u64;

            for (j, b) in rhs.limbs.iter().enumerate() {
                let cur = out[i + j] as u64 + (*a as u64) * (*b as u64) + carry;
                out[i + j] = cur as u32;
                carry = cur >> 32;
            }

            out[i + rhs.limbs.len()] = carry as u32;
        }

        BigUint::from_limbs(out)
    }
}

/// Logical left shift by `rhs` bits. The value grows as needed.
impl Shl<usize> for &BigUint {
    type Output = BigUint;

    fn shl(self, rhs: usize) -> BigUint {
        if self.is_zero() {
            return BigUint::zero();
        }

        let limb_shift = rhs / 32;
        let bit_shift = rhs % 32;
        let mut out = vec![0u32; self.limbs.len() + limb_shift + 1];

        for (i, limb) in self.limbs.iter().enumerate() {
            let wide = (*limb as u64) << bit_shift;
            out[i + limb_shift] |= wide as u32;
            out[i + limb_shift + 1] |= (wide >> 32) as u32;
        }

        BigUint::from_limbs(out)
    }
}

/// Logical right shift by `rhs` bits.
impl Shr<usize> for &BigUint {
    type Output = BigUint;

    fn shr(self, rhs: usize) -> BigUint {
        let limb_shift = rhs / 32;
        let bit_shift = rhs % 32;

        if limb_shift >= self.limbs.len() {
            return BigUint::zero();
        }

        let src = &self.limbs[limb_shift..];
        let out = (0..src.len())
            .map(|i| {
                let lo = (src[i] as u64) >> bit_shift;
                let hi = src.get(i + 1).map_or(0, |next| ((*next as u64) << 32) >> bit_shift);
                (lo | hi) as u32
            })
            .collect();

        BigUint::from_limbs(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(hex_str: &str) -> BigUint {
        BigUint::from_be_bytes(&hex::decode(hex_str).unwrap())
    }

    #[test]
    fn add_carries_across_limbs() {
        let a = BigUint::from_u64(0xffff_ffff_ffff_ffff);
        let sum = &a + &BigUint::one();
        assert_eq!(sum.to_string(), "10000000000000000");
    }

    #[test]
    fn checked_sub_underflow() {
        let a = BigUint::from_u32(5);
        let b = BigUint::from_u32(7);
        assert!(a.checked_sub(&b).is_none());
        assert_eq!(b.checked_sub(&a).unwrap(), BigUint::from_u32(2));
    }

    #[test]
    fn sub_borrows_across_limbs() {
        let a = big("010000000000000000");
        let diff = a.checked_sub(&BigUint::one()).unwrap();
        assert_eq!(diff.to_string(), "ffffffffffffffff");
    }

    #[test]
    fn mul_matches_known_product() {
        let a = big("ffffffffffffffff");
        let product = &a * &a;
        assert_eq!(product.to_string(), "fffffffffffffffe0000000000000001");
    }

    #[test]
    fn div_rem_reconstructs_dividend() {
        let n = big("c4a1c5f0e6f2d7b8a9e0d3c2b1a09f8e7d6c5b4a39281706f5e4d3c2b1a0fedc");
        let d = big("0f1e2d3c4b5a69788796a5b4c3d2e1f1");
        let (q, r) = n.div_rem(&d).unwrap();

        assert!(r < d);
        assert_eq!(&(&q * &d) + &r, n);
    }

    #[test]
    fn div_by_single_limb() {
        let n = big("0123456789abcdef0123456789abcdef");
        let (q, r) = n.div_rem(&BigUint::from_u32(10)).unwrap();
        assert_eq!(&(&q * &BigUint::from_u32(10)) + &BigUint::from_u32(r.low_u32()), n);
        assert_eq!(n.rem_u32(10), Some(r.low_u32()));
    }

    #[test]
    fn div_by_zero_is_none() {
        assert!(BigUint::one().div_rem(&BigUint::zero()).is_none());
        assert!(BigUint::one().rem(&BigUint::zero()).is_none());
        assert_eq!(BigUint::from_u32(12345).rem_u32(0), None);
    }

    #[test]
    fn shifts_are_inverse() {
        let a = big("deadbeefcafebabe0123");
        for shift in [0, 1, 31, 32, 33, 100] {
            assert_eq!(&(&a << shift) >> shift, a);
        }
        assert!((&a >> 200).is_zero());
    }

    #[test]
    fn mod_inverse_small() {
        // 3 * 7 = 21 = 1 mod 10
        let inv = BigUint::from_u32(3).mod_inverse(&BigUint::from_u32(10)).unwrap();
        assert_eq!(inv, BigUint::from_u32(7));
    }

    #[test]
    fn mod_inverse_textbook_rsa() {
        // e = 17, phi = 3120 gives d = 2753.
        let d = BigUint::from_u32(17).mod_inverse(&BigUint::from_u32(3120)).unwrap();
        assert_eq!(d, BigUint::from_u32(2753));
    }

    #[test]
    fn mod_inverse_missing_when_not_coprime() {
        assert!(BigUint::from_u32(6).mod_inverse(&BigUint::from_u32(9)).is_none());
    }
}
