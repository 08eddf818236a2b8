//! RAII lock guard implementation.

use super::error::Result;
use super::mutex::FileMutex;
use tracing::warn;

/// RAII guard for a held [`FileMutex`].
///
/// When dropped, the lock is released unconditionally. If release fails, a
/// warning is logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard<'a> {
    mutex: &'a FileMutex,

    /// Whether the lock has been released manually.
    released: bool,
}

impl<'a> LockGuard<'a> {
    pub(super) fn new(mutex: &'a FileMutex) -> Self {
        Self {
            mutex,
            released: false,
        }
    }

    pub fn mutex(&self) -> &FileMutex {
        self.mutex
    }

    /// Re-validate ownership and renew the lease.
    ///
    /// Returns `false` if the lease expired and another process broke it.
    pub fn is_held(&self) -> Result<bool> {
        self.mutex.locked()
    }

    /// Manually release the lock.
    ///
    /// Unlike dropping the guard, this reports [`LockError::NotLocked`] when
    /// the lock was lost in the meantime.
    ///
    /// [`LockError::NotLocked`]: super::LockError::NotLocked
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.mutex.unlock(false)
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.mutex.unlock(true)
        {
            warn!(
                lock = %self.mutex.lock_path().display(),
                error = %e,
                "failed to release lock"
            );
        }
    }
}
