//! Fallback for other Unix-like systems: read `/dev/urandom`.

use std::fs::File;
use std::io::Read;

use crate::error::{CryptoError, Result};

pub(crate) fn sys_random(buf: &mut [u8]) -> Result<()> {
    let code = |e: std::io::Error| CryptoError::EntropyUnavailable(e.raw_os_error().unwrap_or(-1));

    File::open("/dev/urandom")
        .map_err(code)?
        .read_exact(buf)
        .map_err(code)
}
