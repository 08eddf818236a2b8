//! Error types surfaced by the lock.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a lock operation that did not succeed.
///
/// `AlreadyLocked`, `NotLocked` and `Timeout` are expected, named outcomes.
/// `Io` covers every filesystem failure outside the retryable set and is
/// never retried.
#[derive(Error, Debug)]
pub enum LockError {
    /// The caller tried to acquire a lock it already holds.
    #[error("lock '{}' is already held by this instance", lock_path.display())]
    AlreadyLocked { lock_path: PathBuf },

    /// The caller tried to release a lock it does not hold.
    #[error("lock '{}' is not held by this instance", lock_path.display())]
    NotLocked { lock_path: PathBuf },

    /// The acquisition deadline passed before the lock was obtained.
    #[error("timed out after {:.1}s waiting for lock '{}'", waited.as_secs_f64(), lock_path.display())]
    Timeout { lock_path: PathBuf, waited: Duration },

    /// Unexpected filesystem failure.
    #[error("failed to {op} '{}': {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LockError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        LockError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Whether this error means "try again later" rather than a hard failure.
    pub fn is_temporary(&self) -> bool {
        matches!(self, LockError::Timeout { .. })
    }
}

/// Result type alias for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;
