//! Message authentication codes.
//!
//! Currently provides HMAC (RFC 2104) over every hash exposed by
//! [`crate::hash`]. Tag verification always goes through a constant-time
//! comparison.

mod hmac;

pub use hmac::{HmacContext, hmac, verify};
