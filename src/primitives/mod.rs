//! Primitive types
//!
//! This module defines the low-level numeric types the rest of the crate
//! builds on.
//!
//! Current primitives include:
//! - `BigUint`: an arbitrary-precision unsigned integer with the
//!   arithmetic needed by RSA (division, modular inverse)
//! - `Montgomery`: a precomputed context for modular exponentiation with an
//!   odd modulus
//!
//! These are not a general-purpose big-integer library: they provide only
//! what the crate's own algorithms require.

mod biguint;

pub use biguint::{BigUint, Montgomery};
