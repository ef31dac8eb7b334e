//! RSA key-pair generation
//!
//! Primes are drawn from a caller-supplied [`Csprng`]:
//! - candidates have their two top bits set, so `p * q` has exactly the
//!   requested width
//! - a trial division by small primes discards most composites cheaply
//! - survivors go through Miller-Rabin with a size-dependent round count
//!
//! `d` is computed as `e^-1 mod (p - 1)(q - 1)`.

use zeroize::Zeroize;

use crate::error::{CryptoError, Result};
use crate::primitives::{BigUint, Montgomery};
use crate::rng::Csprng;

use super::{RsaKey, RsaLimits};

/// Odd primes up to 541, for trial division.
const SMALL_PRIMES: [u32; 99] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283,
    293, 307, 311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401,
    409, 419, 421, 431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509,
    521, 523, 541,
];

/// Generates a key pair with a `bits`-wide modulus under default limits.
///
/// # Errors
/// See [`generate_with`].
pub fn generate(bits: usize, e: u32, rng: &mut Csprng) -> Result<RsaKey> {
    generate_with(RsaLimits::default(), bits, e, rng)
}

/// Generates a key pair with a `bits`-wide modulus.
///
/// # Errors
/// - `UnsupportedConfiguration` if `limits` is inconsistent
/// - `InvalidKeySize` if `bits` is odd or outside
///   `limits.min_generated_bits..=limits.max_bits`
/// - `InvalidExponent` if `e` is even or below 3, or not below the modulus
pub fn generate_with(limits: RsaLimits, bits: usize, e: u32, rng: &mut Csprng) -> Result<RsaKey> {
    limits.validate()?;

    if bits % 2 != 0 || bits < limits.min_generated_bits || bits > limits.max_bits {
        return Err(CryptoError::InvalidKeySize(bits));
    }
    if e < 3 || e % 2 == 0 {
        return Err(CryptoError::InvalidExponent);
    }

    log::debug!("generating {bits}-bit rsa key");

    let e_big = BigUint::from_u32(e);
    let mut attempts = 0usize;

    loop {
        attempts += 1;

        let p = random_prime(bits / 2, e, rng)?;
        let q = random_prime(bits / 2, e, rng)?;
        if p == q {
            continue;
        }

        let one = BigUint::one();
        let (Some(p1), Some(q1)) = (p.checked_sub(&one), q.checked_sub(&one)) else {
            continue;
        };
        let phi = &p1 * &q1;

        // gcd(e, phi) != 1 for this pair; draw again.
        let Some(d) = e_big.mod_inverse(&phi) else {
            continue;
        };

        let n = &p * &q;
        log::trace!("rsa key found after {attempts} prime pair(s)");

        return RsaKey::from_parts(limits, n, e_big, Some(d));
    }
}

/// Draws a `bits`-wide probable prime `p` with `p mod e != 1`.
fn random_prime(bits: usize, e: u32, rng: &mut Csprng) -> Result<BigUint> {
    let mut bytes = vec![0u8; bits.div_ceil(8)];
    let excess = bytes.len() * 8 - bits;

    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= 0xff >> excess;

        let mut candidate = BigUint::from_be_bytes(&bytes);
        candidate.set_bit(bits - 1);
        candidate.set_bit(bits - 2);
        candidate.set_bit(0);

        if has_small_factor(&candidate) || candidate.rem_u32(e) == Some(1) {
            continue;
        }

        if is_probable_prime(&candidate, mr_rounds(bits), rng)? {
            bytes.zeroize();
            return Ok(candidate);
        }
    }
}

/// True if a small prime properly divides `n`.
fn has_small_factor(n: &BigUint) -> bool {
    SMALL_PRIMES
        .iter()
        .any(|&p| n.rem_u32(p) == Some(0) && !(n.bits() <= 32 && n.low_u32() == p))
}

/// Miller-Rabin round count by candidate size, following OpenSSL's
/// `BN_prime_checks_for_size` table.
fn mr_rounds(bits: usize) -> usize {
    match bits {
        3747.. => 3,
        1345.. => 4,
        476.. => 5,
        400.. => 6,
        347.. => 7,
        308.. => 8,
        55.. => 27,
        _ => 34,
    }
}

/// Miller-Rabin test with random bases in `[2, n - 2]`. `n` must be odd
/// and greater than 4.
pub(crate) fn is_probable_prime(n: &BigUint, rounds: usize, rng: &mut Csprng) -> Result<bool> {
    let mont = Montgomery::new(n).ok_or(CryptoError::InvalidModulus)?;
    let one = BigUint::one();
    let three = BigUint::from_u32(3);
    let two = BigUint::from_u32(2);

    let n_minus_1 = n.checked_sub(&one).ok_or(CryptoError::InvalidModulus)?;
    let base_range = n.checked_sub(&three).ok_or(CryptoError::InvalidModulus)?;
    if base_range.is_zero() {
        return Err(CryptoError::InvalidModulus);
    }

    let s = (0..n_minus_1.bits())
        .find(|&i| n_minus_1.bit(i))
        .unwrap_or(0);
    let d = &n_minus_1 >> s;

    let mut bytes = vec![0u8; n.bits().div_ceil(8)];

    'witness: for _ in 0..rounds {
        rng.fill_bytes(&mut bytes);
        let a = &BigUint::from_be_bytes(&bytes)
            .rem(&base_range)
            .ok_or(CryptoError::InvalidModulus)?
            + &two;

        let mut x = mont.pow(&a, &d).ok_or(CryptoError::InvalidModulus)?;
        if x.is_one() || x == n_minus_1 {
            continue;
        }

        for _ in 1..s {
            x = mont.pow(&x, &two).ok_or(CryptoError::InvalidModulus)?;
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Csprng {
        Csprng::from_seed([7u8; 32])
    }

    #[test]
    fn small_prime_table_is_prime() {
        for p in SMALL_PRIMES {
            assert!((2..p).take_while(|d| d * d <= p).all(|d| p % d != 0), "{p}");
        }
    }

    #[test]
    fn recognizes_known_primes() {
        let mut rng = rng();
        // 2^127 - 1 and 2^61 - 1
        let mut bytes = [0xffu8; 16];
        bytes[0] = 0x7f;
        let m127 = BigUint::from_be_bytes(&bytes);
        let m61 = BigUint::from_u64((1 << 61) - 1);

        assert!(is_probable_prime(&m127, 20, &mut rng).unwrap());
        assert!(is_probable_prime(&m61, 20, &mut rng).unwrap());
    }

    #[test]
    fn rejects_composites() {
        let mut rng = rng();
        // Carmichael numbers fool Fermat but not Miller-Rabin.
        for c in [561u32, 1105, 1729, 2465, 2821, 6601, 8911] {
            assert!(!is_probable_prime(&BigUint::from_u32(c), 20, &mut rng).unwrap(), "{c}");
        }
        let product = BigUint::from_u64(4_294_967_291u64 * 65_521);
        assert!(!is_probable_prime(&product, 20, &mut rng).unwrap());
    }

    #[test]
    fn small_factor_skips_the_prime_itself() {
        assert!(!has_small_factor(&BigUint::from_u32(193)));
        assert!(has_small_factor(&BigUint::from_u32(193 * 3)));
    }

    #[test]
    fn generated_prime_has_requested_width() {
        let mut rng = rng();
        let p = random_prime(64, 65537, &mut rng).unwrap();
        assert_eq!(p.bits(), 64);
        assert!(p.bit(62));
        assert!(p.is_odd());
    }
}
