use libc::arc4random_buf;

use crate::error::Result;

/// `arc4random_buf` cannot fail.
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<()> {
    unsafe {
        arc4random_buf(buf.as_mut_ptr() as *mut libc::c_void, buf.len());
    }

    Ok(())
}
