//! Hash Engine.
//!
//! Pure-Rust implementations of the SHA-2 family (SHA-224, SHA-256,
//! SHA-384, SHA-512) and, behind the default `legacy` feature, MD5 and
//! SHA-1.
//!
//! Each algorithm lives in its own module with its compression function and
//! a one-shot helper. [`HashContext`] wraps them behind a single streaming
//! interface selected by [`DigestAlgorithm`].

mod algorithm;
pub(crate) mod buffer;
mod context;
mod digest;

#[cfg(feature = "legacy")]
pub mod md5;
#[cfg(feature = "legacy")]
pub mod sha1;
pub mod sha256;
pub mod sha512;

pub use algorithm::DigestAlgorithm;
pub use context::{HashContext, digest};
pub use digest::Digest;

/// Re-export of the one-shot SHA-2 functions.
pub use sha256::core::{sha224, sha256};
pub use sha512::core::{sha384, sha512};

#[cfg(feature = "legacy")]
pub use md5::core::md5;
#[cfg(feature = "legacy")]
pub use sha1::core::sha1;
