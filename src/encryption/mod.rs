//! Symmetric encryption.
//!
//! - [`chacha20`]: the raw stream cipher
//! - [`poly1305`]: the one-time authenticator
//! - [`aead`]: the ChaCha20-Poly1305 composition, which is what callers
//!   should normally use
//!
//! The raw primitives are public for test vectors and for constructions
//! that need them; neither provides integrity on its own.

pub mod aead;
pub mod chacha20;
pub mod poly1305;

pub use aead::{AeadContext, NonceSequence, open, seal};
