//! Montgomery modular exponentiation
//!
//! Multiplication uses the CIOS (coarsely integrated operand scanning)
//! form over 32-bit limbs with `R = 2^(32k)` for a `k`-limb modulus.
//! Exponentiation is square-and-multiply-always: every exponent bit costs
//! one squaring and one multiplication, and the product is kept or dropped
//! with a mask rather than a branch. The final conditional subtraction is
//! masked the same way.

use zeroize::Zeroize;

use super::BigUint;

/// Precomputed state for arithmetic modulo an odd `n > 1`.
#[derive(Clone)]
pub struct Montgomery {
    modulus: Vec<u32>,
    n0_inv: u32,
    r2: Vec<u32>,
}

impl Montgomery {
    /// Prepares a context for `modulus`. Returns `None` unless the modulus
    /// is odd and greater than one.
    pub fn new(modulus: &BigUint) -> Option<Self> {
        if modulus.is_even() || modulus.is_one() {
            return None;
        }

        let k = modulus.limbs.len();

        // -n^-1 mod 2^32 by Newton iteration; n*n = 1 mod 8 seeds 3 bits.
        let n0 = modulus.limbs[0];
        let mut inv = n0;
        for _ in 0..4 {
            inv = inv.wrapping_mul(2u32.wrapping_sub(n0.wrapping_mul(inv)));
        }

        let r2 = (&BigUint::one() << (64 * k)).rem(modulus)?;

        Some(Self {
            modulus: modulus.limbs.clone(),
            n0_inv: inv.wrapping_neg(),
            r2: pad(&r2, k),
        })
    }

    fn len(&self) -> usize {
        self.modulus.len()
    }

    /// Returns `a * b * R^-1 mod n` for `a, b < n`.
    fn mul(&self, a: &[u32], b: &[u32]) -> Vec<u32> {
        let k = self.len();
        let n = &self.modulus;
        let mut t = vec![0u32; k + 2];

        for &ai in a.iter().take(k) {
            let ai = ai as u64;

            let mut carry = 0u64;
            for j in 0..k {
                let cur = t[j] as u64 + ai * b[j] as u64 + carry;
                t[j] = cur as u32;
                carry = cur >> 32;
            }
            let cur = t[k] as u64 + carry;
            t[k] = cur as u32;
            t[k + 1] = (cur >> 32) as u32;

            let m = t[0].wrapping_mul(self.n0_inv) as u64;
            let cur = t[0] as u64 + m * n[0] as u64;
            let mut carry = cur >> 32;
            for j in 1..k {
                let cur = t[j] as u64 + m * n[j] as u64 + carry;
                t[j - 1] = cur as u32;
                carry = cur >> 32;
            }
            let cur = t[k] as u64 + carry;
            t[k - 1] = cur as u32;
            let cur = t[k + 1] as u64 + (cur >> 32);
            t[k] = cur as u32;
            t[k + 1] = 0;
        }

        // t < 2n here; subtract n and keep whichever result is in range.
        let mut out = vec![0u32; k];
        let mut borrow = 0u32;
        for j in 0..k {
            let (d1, b1) = t[j].overflowing_sub(n[j]);
            let (d2, b2) = d1.overflowing_sub(borrow);
            out[j] = d2;
            borrow = (b1 | b2) as u32;
        }
        let (_, underflow) = t[k].overflowing_sub(borrow);

        let keep_diff = 0u32.wrapping_sub((!underflow) as u32);
        for j in 0..k {
            out[j] = (out[j] & keep_diff) | (t[j] & !keep_diff);
        }

        t.zeroize();
        out
    }

    /// `base^exp mod n`. `base` is reduced first if it is not below `n`.
    pub fn pow(&self, base: &BigUint, exp: &BigUint) -> Option<BigUint> {
        let k = self.len();
        let modulus = BigUint::from_limbs(self.modulus.clone());

        let mut reduced = if base >= &modulus {
            base.rem(&modulus)?
        } else {
            base.clone()
        };

        let mut base_m = self.mul(&pad(&reduced, k), &self.r2);
        reduced.zeroize();

        // 1 in Montgomery form is R mod n.
        let mut acc = self.mul(&pad(&BigUint::one(), k), &self.r2);

        for i in (0..exp.bits()).rev() {
            let mut squared = self.mul(&acc, &acc);
            acc.zeroize();
            let mut product = self.mul(&squared, &base_m);

            let mask = 0u32.wrapping_sub(exp.bit(i) as u32);
            acc = squared
                .iter()
                .zip(product.iter())
                .map(|(s, p)| (s & !mask) | (p & mask))
                .collect();
            squared.zeroize();
            product.zeroize();
        }

        let mut one = vec![0u32; k];
        one[0] = 1;
        let mut out = self.mul(&acc, &one);

        let result = BigUint::from_limbs(out.clone());
        out.zeroize();
        acc.zeroize();
        base_m.zeroize();

        Some(result)
    }
}

/// Little-endian limbs of `value`, zero-extended to `k` limbs.
fn pad(value: &BigUint, k: usize) -> Vec<u32> {
    let mut limbs = value.limbs.clone();
    limbs.resize(k, 0);
    limbs
}

impl BigUint {
    /// `self^exp mod modulus` through a one-off [`Montgomery`] context.
    ///
    /// Returns `None` unless the modulus is odd and greater than one.
    pub fn mod_pow(&self, exp: &BigUint, modulus: &BigUint) -> Option<BigUint> {
        Montgomery::new(modulus)?.pow(self, exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(hex_str: &str) -> BigUint {
        BigUint::from_be_bytes(&hex::decode(hex_str).unwrap())
    }

    #[test]
    fn small_modpow() {
        // 4^13 mod 497 = 445
        let out = BigUint::from_u32(4)
            .mod_pow(&BigUint::from_u32(13), &BigUint::from_u32(497))
            .unwrap();
        assert_eq!(out, BigUint::from_u32(445));
    }

    #[test]
    fn zero_exponent_is_one() {
        let out = BigUint::from_u32(12345)
            .mod_pow(&BigUint::zero(), &BigUint::from_u32(3233))
            .unwrap();
        assert!(out.is_one());
    }

    #[test]
    fn textbook_rsa_round_trip() {
        let n = BigUint::from_u32(3233);
        let e = BigUint::from_u32(17);
        let d = BigUint::from_u32(2753);

        let c = BigUint::from_u32(65).mod_pow(&e, &n).unwrap();
        assert_eq!(c, BigUint::from_u32(2790));
        assert_eq!(c.mod_pow(&d, &n).unwrap(), BigUint::from_u32(65));
    }

    #[test]
    fn base_larger_than_modulus_is_reduced() {
        let n = BigUint::from_u32(3233);
        let a = BigUint::from_u32(65 + 3233 * 7);
        let out = a.mod_pow(&BigUint::from_u32(17), &n).unwrap();
        assert_eq!(out, BigUint::from_u32(2790));
    }

    #[test]
    fn even_modulus_rejected() {
        assert!(Montgomery::new(&BigUint::from_u32(10)).is_none());
        assert!(Montgomery::new(&BigUint::one()).is_none());
    }

    #[test]
    fn fermat_on_multi_limb_prime() {
        // 2^127 - 1 is prime, so a^(p-1) = 1 mod p.
        let p = big("7fffffffffffffffffffffffffffffff");
        let exp = p.checked_sub(&BigUint::one()).unwrap();
        for a in [2u32, 3, 0xdead_beef] {
            assert!(BigUint::from_u32(a).mod_pow(&exp, &p).unwrap().is_one());
        }
    }
}
