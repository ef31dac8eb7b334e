use std::fmt;
use std::str::FromStr;

use crate::capability::Algorithm;
use crate::error::{CryptoError, Result};

/// Hash function identifiers.
///
/// The set is closed: every variant is always part of the enum, but
/// [`DigestAlgorithm::Md5`] and [`DigestAlgorithm::Sha1`] are only usable
/// when the `legacy` feature is enabled (see [`DigestAlgorithm::is_available`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Every identifier, available or not.
    pub const ALL: [DigestAlgorithm; 6] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Canonical lowercase name, as accepted by OpenSSL's digest lookup.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Digest size in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Compression-function block size in bytes.
    pub const fn block_len(self) -> usize {
        match self {
            Self::Md5 | Self::Sha1 | Self::Sha224 | Self::Sha256 => 64,
            Self::Sha384 | Self::Sha512 => 128,
        }
    }

    /// Whether this build can instantiate the algorithm.
    pub const fn is_available(self) -> bool {
        match self {
            Self::Md5 | Self::Sha1 => cfg!(feature = "legacy"),
            _ => true,
        }
    }

    /// The capability identifier of the plain hash.
    pub const fn algorithm(self) -> Algorithm {
        match self {
            Self::Md5 => Algorithm::Md5,
            Self::Sha1 => Algorithm::Sha1,
            Self::Sha224 => Algorithm::Sha224,
            Self::Sha256 => Algorithm::Sha256,
            Self::Sha384 => Algorithm::Sha384,
            Self::Sha512 => Algorithm::Sha512,
        }
    }

    /// The capability identifier of HMAC over this hash.
    pub const fn hmac_algorithm(self) -> Algorithm {
        match self {
            Self::Md5 => Algorithm::HmacMd5,
            Self::Sha1 => Algorithm::HmacSha1,
            Self::Sha224 => Algorithm::HmacSha224,
            Self::Sha256 => Algorithm::HmacSha256,
            Self::Sha384 => Algorithm::HmacSha384,
            Self::Sha512 => Algorithm::HmacSha512,
        }
    }

    /// Looks up an algorithm by name.
    ///
    /// Matching ignores ASCII case and the `-`/`_` separators, so `"sha256"`,
    /// `"SHA-256"` and `"sha_256"` all resolve to [`DigestAlgorithm::Sha256`].
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the name is unknown or the algorithm is
    /// compiled out.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let found = Self::ALL
            .into_iter()
            .find(|alg| alg.name() == normalized)
            .ok_or(CryptoError::UnsupportedAlgorithm)?;

        if !found.is_available() {
            log::debug!("digest {} requested but compiled out", found.name());
            return Err(CryptoError::UnsupportedAlgorithm);
        }

        Ok(found)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}
