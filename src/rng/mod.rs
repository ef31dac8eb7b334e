//! Random number generation.
//!
//! [`Csprng`] is a ChaCha20-based generator seeded from the operating
//! system. A single process-wide instance backs [`fill_random`] and
//! [`random_bytes`]:
//!
//! - it is created lazily on first use, seeded once from OS entropy
//! - access is serialized by a mutex, so any thread may call it
//! - if seeding fails the error is returned and the next call retries
//!
//! Callers that want an independent stream (e.g. per worker) can own a
//! [`Csprng`] directly.

mod csprng;

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;

use crate::error::Result;

pub use csprng::Csprng;

static GLOBAL: Lazy<Mutex<Option<Csprng>>> = Lazy::new(|| Mutex::new(None));

fn lock_global() -> MutexGuard<'static, Option<Csprng>> {
    // The generator holds no invariant a panicking holder could break.
    GLOBAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Fills `out` from the process-wide generator.
///
/// # Errors
/// `EntropyUnavailable` if the generator has not been seeded yet and the
/// OS entropy source fails.
pub fn fill_random(out: &mut [u8]) -> Result<()> {
    let mut guard = lock_global();

    if guard.is_none() {
        log::debug!("seeding process-wide csprng from os entropy");
        *guard = Some(Csprng::from_os()?);
    }

    if let Some(rng) = guard.as_mut() {
        rng.fill_bytes(out);
    }

    Ok(())
}

/// Returns `len` random bytes from the process-wide generator.
///
/// # Errors
/// See [`fill_random`].
pub fn random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; len];
    fill_random(&mut out)?;
    Ok(out)
}
