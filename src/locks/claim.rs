//! Claim-file naming.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence so two mutexes in one process never share a claim.
static CLAIM_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Derive a fresh claim path for `lock_path`.
///
/// The name is `<lock_path>.<host>.<pid>.<counter>`. Holder identity is
/// decided by comparing the bytes of this path with the lock's content, so
/// it must be unique per (host, process, instance).
pub(super) fn claim_path_for(lock_path: &Path) -> PathBuf {
    let counter = CLAIM_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = lock_path.as_os_str().to_os_string();
    name.push(format!(".{}.{}.{}", host_string(), std::process::id(), counter));
    PathBuf::from(name)
}

/// Raw bytes of `path` as written into a claim file.
#[cfg(unix)]
pub(super) fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
pub(super) fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

/// Inverse of [`path_to_bytes`]: the path named by a lock's content.
#[cfg(unix)]
pub(super) fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
pub(super) fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Hostname of this machine, or `unknown` when it cannot be determined.
pub(crate) fn host_string() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
