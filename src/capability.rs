//! Version and capability query
//!
//! Callers ask what this build can do instead of probing for it: the
//! [`CapabilityReport`] lists every algorithm identifier that can be
//! instantiated, and the numeric version follows the
//! `OPENSSL_VERSION_NUMBER` layout so existing version gates keep working.
//!
//! The report is built once, on first use, and never changes afterwards.

use std::fmt;

use once_cell::sync::Lazy;

use crate::error::{CryptoError, Result};
use crate::hash::DigestAlgorithm;

/// Minimum version number this crate reports: the 1.1.0 tier, where
/// `EVP_MD_CTX_new`, `HMAC_CTX_new` and `RSA_set0_key` are native.
pub const MIN_VERSION_NUMBER: u32 = 0x1010_0000;

/// Every algorithm identifier the crate knows about.
///
/// The set is closed; whether a given identifier is usable in this build is
/// answered by [`CapabilityReport::supports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    HmacMd5,
    HmacSha1,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
    ChaCha20Poly1305,
    Rsa,
}

impl Algorithm {
    pub const ALL: [Algorithm; 14] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::HmacMd5,
        Self::HmacSha1,
        Self::HmacSha224,
        Self::HmacSha256,
        Self::HmacSha384,
        Self::HmacSha512,
        Self::ChaCha20Poly1305,
        Self::Rsa,
    ];

    /// OpenSSL-style lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::HmacMd5 => "hmac-md5",
            Self::HmacSha1 => "hmac-sha1",
            Self::HmacSha224 => "hmac-sha224",
            Self::HmacSha256 => "hmac-sha256",
            Self::HmacSha384 => "hmac-sha384",
            Self::HmacSha512 => "hmac-sha512",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
            Self::Rsa => "rsa",
        }
    }

    /// The underlying hash, for hash and HMAC identifiers.
    pub const fn digest(self) -> Option<DigestAlgorithm> {
        match self {
            Self::Md5 | Self::HmacMd5 => Some(DigestAlgorithm::Md5),
            Self::Sha1 | Self::HmacSha1 => Some(DigestAlgorithm::Sha1),
            Self::Sha224 | Self::HmacSha224 => Some(DigestAlgorithm::Sha224),
            Self::Sha256 | Self::HmacSha256 => Some(DigestAlgorithm::Sha256),
            Self::Sha384 | Self::HmacSha384 => Some(DigestAlgorithm::Sha384),
            Self::Sha512 | Self::HmacSha512 => Some(DigestAlgorithm::Sha512),
            Self::ChaCha20Poly1305 | Self::Rsa => None,
        }
    }

    const fn is_compiled_in(self) -> bool {
        match self.digest() {
            Some(digest) => digest.is_available(),
            None => true,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic version of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    /// Packs the version as `major << 28 | minor << 20 | patch << 4`.
    ///
    /// Only the low four bits of `major` and eight bits of `minor` and
    /// `patch` fit; the status nibble is left at zero.
    pub const fn number(self) -> u32 {
        ((self.major as u32 & 0x0f) << 28) | ((self.minor as u32) << 20) | ((self.patch as u32) << 4)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Immutable description of what this build provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    version: Version,
    algorithms: Vec<Algorithm>,
}

impl CapabilityReport {
    fn build() -> Self {
        let version = Version {
            major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            patch: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
        };

        let algorithms: Vec<Algorithm> = Algorithm::ALL
            .into_iter()
            .filter(|alg| alg.is_compiled_in())
            .collect();

        log::trace!(
            "capability report built: version {version}, {} algorithm(s)",
            algorithms.len()
        );

        Self {
            version,
            algorithms,
        }
    }

    pub fn supports(&self, algorithm: Algorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }

    /// Fails with `UnsupportedAlgorithm` unless the algorithm is available.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the algorithm is compiled out.
    pub fn require(&self, algorithm: Algorithm) -> Result<()> {
        if self.supports(algorithm) {
            Ok(())
        } else {
            Err(CryptoError::UnsupportedAlgorithm)
        }
    }

    /// Supported identifiers, in declaration order.
    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// The packed version, never below [`MIN_VERSION_NUMBER`].
    pub fn version_number(&self) -> u32 {
        self.version.number().max(MIN_VERSION_NUMBER)
    }
}

static REPORT: Lazy<CapabilityReport> = Lazy::new(CapabilityReport::build);

/// Returns the capability report of this build.
///
/// No initialization is needed and repeated calls return the same value.
pub fn capabilities() -> &'static CapabilityReport {
    &REPORT
}

/// `OPENSSL_VERSION_NUMBER` analogue.
pub fn version_number() -> u32 {
    capabilities().version_number()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_packing() {
        let v = Version {
            major: 1,
            minor: 1,
            patch: 0,
        };
        assert_eq!(v.number(), 0x1010_0000);

        let v = Version {
            major: 3,
            minor: 2,
            patch: 1,
        };
        assert_eq!(v.number(), 0x3020_0010);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Algorithm::ALL.len());
    }

    #[test]
    fn hmac_and_hash_share_digest() {
        for digest in DigestAlgorithm::ALL {
            assert_eq!(digest.algorithm().digest(), Some(digest));
            assert_eq!(digest.hmac_algorithm().digest(), Some(digest));
        }
    }
}
