//! Operating system abstraction layer (Linux)
//!
//! Entropy comes from the `getrandom` system call, which reads the kernel
//! entropy pool directly and blocks only until the pool is initialized
//! at boot.

use libc::{EINTR, c_void, getrandom};

use crate::error::{CryptoError, Result};

/// Fills `buf` with random bytes from the kernel.
///
/// Partial reads and `EINTR` are retried until the buffer is full.
///
/// # Errors
/// `EntropyUnavailable` with the `errno` value on any other failure.
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;

    while filled < buf.len() {
        let ret = unsafe {
            getrandom(
                buf[filled..].as_mut_ptr() as *mut c_void,
                buf.len() - filled,
                0,
            )
        };

        if ret < 0 {
            let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(-1);
            if errno == EINTR {
                continue;
            }
            return Err(CryptoError::EntropyUnavailable(errno));
        }

        filled += ret as usize;
    }

    Ok(())
}
