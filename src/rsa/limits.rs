//! Size limits for RSA keys.
//!
//! The limits bound both assembled keys and generated ones. They exist so
//! that untrusted key material cannot make the crate perform arbitrarily
//! large modular exponentiations.

use crate::error::{CryptoError, Result};

/// Bit-width limits applied to RSA key assembly and generation.
///
/// # Defaults
/// - `max_bits`: 8192, the largest modulus OpenSSL accepts by default for
///   public-key operations
/// - `min_generated_bits`: 512, the smallest key [`super::generate`] will
///   produce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsaLimits {
    /// Maximum bit width of `n`, `e` and `d`.
    pub max_bits: usize,
    /// Minimum modulus size accepted by key generation.
    pub min_generated_bits: usize,
}

impl RsaLimits {
    /// Checks the limits are internally consistent.
    ///
    /// # Errors
    /// `UnsupportedConfiguration` if `max_bits` is below 16 or
    /// `min_generated_bits` is below 16 or above `max_bits`.
    pub fn validate(&self) -> Result<()> {
        if self.max_bits < 16 {
            return Err(CryptoError::UnsupportedConfiguration(
                "max_bits must be at least 16",
            ));
        }

        if self.min_generated_bits < 16 {
            return Err(CryptoError::UnsupportedConfiguration(
                "min_generated_bits must be at least 16",
            ));
        }

        if self.min_generated_bits > self.max_bits {
            return Err(CryptoError::UnsupportedConfiguration(
                "min_generated_bits exceeds max_bits",
            ));
        }

        Ok(())
    }
}

impl Default for RsaLimits {
    fn default() -> Self {
        Self {
            max_bits: 8192,
            min_generated_bits: 512,
        }
    }
}
