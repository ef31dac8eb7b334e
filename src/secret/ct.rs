use std::hint::black_box;

/// Constant-time comparison utilities.
///
/// Implementations must not introduce data-dependent branches or early
/// exits. Only the *lengths* of the inputs may influence timing.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8] {
    /// Slices of different length compare unequal immediately; lengths are
    /// public (tags and digests have fixed sizes).
    #[inline]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let diff = self
            .iter()
            .zip(other)
            .fold(0u8, |acc, (a, b)| acc | black_box(a ^ b));

        // Map 0 -> 1 and anything else -> 0 without branching.
        ((((diff as u64).wrapping_sub(1)) >> 63) as u8) == 1
    }
}

impl<const N: usize> ConstantTimeEq for [u8; N] {
    #[inline]
    fn ct_eq(&self, other: &Self) -> bool {
        self[..].ct_eq(&other[..])
    }
}

/// Compares two byte strings in constant time.
///
/// Intended for verifying MACs and tags against expected values.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_slices() {
        assert!(ct_eq(b"same bytes", b"same bytes"));
        assert!(ct_eq(&[], &[]));
    }

    #[test]
    fn differing_slices() {
        assert!(!ct_eq(b"same bytes", b"same bytez"));
        assert!(!ct_eq(&[0x80], &[0x00]));
    }

    #[test]
    fn length_mismatch() {
        assert!(!ct_eq(b"short", b"shorter"));
    }

    #[test]
    fn arrays() {
        let a = [7u8; 16];
        let mut b = a;
        assert!(a.ct_eq(&b));
        b[15] ^= 1;
        assert!(!a.ct_eq(&b));
    }
}
