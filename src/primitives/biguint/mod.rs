//! Arbitrary-precision unsigned integers
//!
//! `BigUint` backs the RSA engine. It is a small, purpose-built type rather
//! than a general big-integer library: enough arithmetic to validate keys,
//! generate primes and run Montgomery exponentiation.

mod core;
mod montgomery;
mod ops;

pub use self::core::BigUint;
pub use montgomery::Montgomery;
