use std::path::Path;

use tracing::debug;

use crate::error::ExecResult;

/// Free space required before an update download is allowed to start.
pub const MIN_UPDATE_DISK_BYTES: u64 = 100 * 1024 * 1024;

/// Reports whether the filesystem holding `path` has room for an update.
///
/// Syscall failures are errors; the caller must not treat them as "no
/// space".
#[cfg(unix)]
pub fn is_disk_space_sufficient(path: &Path) -> ExecResult<bool> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    use crate::error::ExecError;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| ExecError::InvalidSpec("path contains an interior NUL byte".to_string()))?;

    let mut stats: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stats) } != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    let available = stats.f_bavail as u64 * stats.f_bsize as u64;
    debug!(path = %path.display(), available, "checked free disk space");

    Ok(available >= MIN_UPDATE_DISK_BYTES)
}

#[cfg(not(unix))]
pub fn is_disk_space_sufficient(_path: &Path) -> ExecResult<bool> {
    Err(crate::error::ExecError::UnsupportedPlatform(
        "disk-space precheck requires a unix host".to_string(),
    ))
}
