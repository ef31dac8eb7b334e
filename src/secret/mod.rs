//! Secret-bearing buffers and constant-time helpers.
//!
//! Everything that holds key material in this crate goes through one of the
//! types defined here, so that zeroization happens in exactly one place:
//!
//! - [`SecretBytes`]: fixed-capacity, stack-allocated buffer
//! - [`SecretVec`]: growable heap buffer
//!
//! Both wipe their contents when dropped, which covers early returns through
//! `?` as well as the normal path.
//!
//! The [`ConstantTimeEq`] trait and the [`ct_eq`] function compare byte
//! strings without exiting on the first mismatching byte.

mod buffer;
mod ct;

pub use buffer::{SecretBytes, SecretVec};
pub use ct::{ConstantTimeEq, ct_eq};
