//! RSA key assembly
//!
//! [`RsaKey`] is built from big-endian components through a validating
//! constructor, or generated with [`generate`]. The raw transform is plain
//! modular exponentiation in Montgomery form; [`pkcs1`] layers
//! RSASSA-PKCS1-v1_5 signatures and RSAES-PKCS1-v1_5 encryption on top of
//! it.
//!
//! `raw_transform` is textbook RSA and is only safe as a building block.

mod key;
mod keygen;
mod limits;
pub mod pkcs1;

pub use key::RsaKey;
pub use keygen::{generate, generate_with};
pub use limits::RsaLimits;
