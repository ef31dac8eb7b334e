//! Self-contained cryptographic primitives
//!
//! This crate provides the hashing, message authentication, authenticated
//! encryption and RSA building blocks that OpenSSL-facing code expects,
//! implemented in pure Rust with no native crypto library underneath.
//!
//! The focus is on **clarity, predictability, and auditability**: every
//! primitive is a portable reference implementation with explicit
//! semantics, every fallible call returns [`Result`], and every buffer that
//! holds secret material is wiped when it goes out of scope.
//!
//! # Module overview
//!
//! - `hash`  
//!   SHA-224, SHA-256, SHA-384 and SHA-512, plus MD5 and SHA-1 behind the
//!   default `legacy` feature. [`hash::HashContext`] streams any of them;
//!   one-shot helpers cover the common case.
//!
//! - `mac`  
//!   HMAC (RFC 2104) over every available hash, with constant-time tag
//!   verification.
//!
//! - `encryption`  
//!   ChaCha20, Poly1305 and their RFC 8439 AEAD composition. Decryption is
//!   verify-then-release: no plaintext leaves [`encryption::AeadContext`]
//!   before the tag has been checked.
//!
//! - `rsa`  
//!   Validated RSA key assembly, raw modular exponentiation, key-pair
//!   generation, PKCS#1 v1.5 signatures and PKCS#1 v1.5 encryption.
//!
//! - `primitives`  
//!   The arbitrary-precision [`primitives::BigUint`] and Montgomery
//!   arithmetic backing the RSA engine.
//!
//! - `rng`  
//!   A ChaCha20-based CSPRNG seeded from the operating system, and the
//!   process-wide instance behind [`rng::fill_random`].
//!
//! - `secret`  
//!   Zeroizing buffers and constant-time comparison.
//!
//! - `capability`  
//!   The build's capability report and an `OPENSSL_VERSION_NUMBER`-style
//!   version number.
//!
//! # Design goals
//!
//! - Minimal and explicit APIs
//! - Errors instead of panics in library code
//! - Stable, well-defined semantics
//! - Clear separation between cryptographic code and supporting utilities
//!
//! This crate is not intended to replace full-featured, externally audited
//! cryptographic libraries. None of the code paths are hardware-accelerated
//! and only the secret-dependent RSA exponentiation is written to avoid
//! data-dependent branches.

mod os;

pub mod capability;
pub mod encryption;
pub mod error;
pub mod hash;
pub mod mac;
pub mod primitives;
pub mod rng;
pub mod rsa;
pub mod secret;

pub use error::{CryptoError, Result};
