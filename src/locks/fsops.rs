//! Filesystem primitives the lock is built from.
//!
//! Every helper here sits directly on one syscall. Errors are handed back
//! as `io::Error` and classified with [`FsErrorKind`] so the acquisition
//! loop can switch on the kind instead of inspecting raw errno values.
//! Helpers whose callers never care about a missing file fold "not found"
//! into `Ok(None)` / `Ok(())`.

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Classification of a filesystem error at the syscall boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    NotFound,
    AlreadyExists,
    PermissionDenied,
    Other,
}

impl FsErrorKind {
    pub fn of(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsErrorKind::NotFound,
            io::ErrorKind::AlreadyExists => FsErrorKind::AlreadyExists,
            io::ErrorKind::PermissionDenied => FsErrorKind::PermissionDenied,
            _ => FsErrorKind::Other,
        }
    }
}

/// Create or truncate a claim file whose content is its own path.
///
/// The file is made group-writable so cooperating processes running under
/// different users in the same group can break a stale claim.
pub fn write_claim(path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o664))?;
    }

    Ok(())
}

/// Set both timestamps of `path` to `now + lifetime`.
///
/// The modification time is the lease expiry instant. A missing file is
/// not an error: there is nothing left to extend. A lifetime reaching past
/// the representable time range is rejected as `InvalidInput`.
pub fn touch(path: &Path, lifetime: Duration) -> io::Result<()> {
    let expiry = SystemTime::now().checked_add(lifetime).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("lease lifetime of {}s is out of range", lifetime.as_secs()),
        )
    })?;
    let expiry = FileTime::from_system_time(expiry);
    match filetime::set_file_times(path, expiry, expiry) {
        Err(e) if FsErrorKind::of(&e) == FsErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Create a hard link `dst` pointing at the same inode as `src`.
///
/// This is the single atomic step of the protocol: either the link exists
/// afterwards or the call failed.
pub fn link(src: &Path, dst: &Path) -> io::Result<()> {
    fs::hard_link(src, dst)
}

/// Number of directory entries referencing the inode behind `path`.
#[cfg(unix)]
pub fn link_count(path: &Path) -> io::Result<Option<u64>> {
    use std::os::unix::fs::MetadataExt;

    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.nlink())),
        Err(e) if FsErrorKind::of(&e) == FsErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
pub fn link_count(_path: &Path) -> io::Result<Option<u64>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "link counts are only available on unix",
    ))
}

/// Read the holder identity stored in the lock path, as raw bytes.
pub fn read_holder(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if FsErrorKind::of(&e) == FsErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Modification time of `path`, i.e. the lease expiry of whoever owns it.
pub fn modified(path: &Path) -> io::Result<Option<SystemTime>> {
    match fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(mtime) => Ok(Some(mtime)),
        Err(e) if FsErrorKind::of(&e) == FsErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Remove `path`, treating "already gone" as success.
///
/// Returns whether this call removed the entry.
pub fn remove_ignoring_missing(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if FsErrorKind::of(&e) == FsErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
