//! Hard-link based mutual exclusion with lease expiry.

use super::claim::{claim_path_for, path_from_bytes, path_to_bytes};
use super::error::{LockError, Result};
use super::fsops::{self, FsErrorKind};
use super::guard::LockGuard;
use super::holder::HolderInfo;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, warn};

/// Lease granted to a holder unless configured otherwise.
pub const DEFAULT_LOCK_LIFETIME: Duration = Duration::from_secs(30);

/// Bounds of the randomized pause between acquisition attempts.
const RETRY_SLEEP_MIN_MS: u64 = 10;
const RETRY_SLEEP_MAX_MS: u64 = 2010;

/// A named, crash-recoverable lock shared through the filesystem.
///
/// Each instance owns a private claim file next to the lock path. Acquiring
/// means hard-linking the claim file to the lock path; the link either
/// appears atomically or the call fails, which also holds on NFS where
/// exclusive create does not. A lock path whose inode has exactly two links
/// and whose content names our claim file is ours.
///
/// The claim file's modification time is the lease expiry. Any contender
/// that finds the lease in the past may break the lock, so a holder doing
/// long work must call [`locked`](Self::locked) (which renews the lease) more
/// often than the lifetime.
///
/// Dropping the mutex releases the lock if it is still held.
#[derive(Debug)]
pub struct FileMutex {
    lock_path: PathBuf,
    claim_path: PathBuf,
    /// `claim_path` as stored in the lock file and compared against it.
    claim_id: Vec<u8>,
    lifetime: Duration,
}

impl FileMutex {
    /// Create a mutex on `lock_path` with the default lease lifetime.
    ///
    /// No filesystem access happens until the lock is used.
    pub fn new(lock_path: impl Into<PathBuf>) -> Self {
        Self::with_lifetime(lock_path, DEFAULT_LOCK_LIFETIME)
    }

    /// Create a mutex on `lock_path` granting leases of `lifetime`.
    pub fn with_lifetime(lock_path: impl Into<PathBuf>, lifetime: Duration) -> Self {
        let lock_path = lock_path.into();
        let claim_path = claim_path_for(&lock_path);
        let claim_id = path_to_bytes(&claim_path);
        Self {
            lock_path,
            claim_path,
            claim_id,
            lifetime,
        }
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    pub fn claim_path(&self) -> &Path {
        &self.claim_path
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Set the lease lifetime.
    ///
    /// Takes effect the next time the lease is renewed; the expiry of a lock
    /// that is already held is left alone.
    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime;
    }

    /// Whether this instance holds the lock.
    ///
    /// Renews the lease as a side effect, so a holder that polls this more
    /// often than its lifetime never loses the lock to expiry.
    pub fn locked(&self) -> Result<bool> {
        if let Err(e) = fsops::touch(&self.claim_path, self.lifetime) {
            if FsErrorKind::of(&e) == FsErrorKind::PermissionDenied {
                // Someone else's inode; it cannot be our lock.
                return Ok(false);
            }
            return Err(LockError::io("touch claim file", &self.claim_path, e));
        }

        if self.lock_link_count()? != Some(2) {
            return Ok(false);
        }
        Ok(self.is_own_claim(self.read_lock()?.as_deref()))
    }

    /// Renew the lease, optionally switching to a new lifetime first.
    ///
    /// Fails with [`LockError::NotLocked`] when the lock is not held, unless
    /// `unconditionally` is set.
    pub fn refresh(&mut self, new_lifetime: Option<Duration>, unconditionally: bool) -> Result<()> {
        if let Some(lifetime) = new_lifetime {
            self.set_lifetime(lifetime);
        }
        if !self.locked()? && !unconditionally {
            return Err(LockError::NotLocked {
                lock_path: self.lock_path.clone(),
            });
        }
        Ok(())
    }

    /// Acquire the lock, blocking until it is obtained.
    ///
    /// With a non-zero `timeout`, gives up with [`LockError::Timeout`] once
    /// the deadline has passed. `None`, a zero timeout, or one too large for
    /// the monotonic clock waits indefinitely.
    /// Re-acquiring a lock this instance already holds fails with
    /// [`LockError::AlreadyLocked`].
    pub fn lock(&self, timeout: Option<Duration>) -> Result<()> {
        let started = Instant::now();
        let deadline = timeout
            .filter(|t| !t.is_zero())
            .and_then(|t| started.checked_add(t));

        fsops::write_claim(&self.claim_path, &self.claim_id)
            .map_err(|e| LockError::io("write claim file", &self.claim_path, e))?;
        if let Err(e) = self.touch_claim() {
            self.discard_claim();
            return Err(e);
        }

        loop {
            match fsops::link(&self.claim_path, &self.lock_path) {
                Ok(()) => {
                    self.touch_claim()?;
                    debug!(lock = %self.lock_path.display(), claim = %self.claim_path.display(), "acquired lock");
                    return Ok(());
                }
                Err(e) => match FsErrorKind::of(&e) {
                    FsErrorKind::NotFound => {
                        debug!(claim = %self.claim_path.display(), "claim file missing during link, retrying");
                    }
                    FsErrorKind::AlreadyExists => {
                        if self.lock_link_count()? == Some(2)
                            && self.is_own_claim(self.read_lock()?.as_deref())
                        {
                            return Err(LockError::AlreadyLocked {
                                lock_path: self.lock_path.clone(),
                            });
                        }
                    }
                    FsErrorKind::PermissionDenied | FsErrorKind::Other => {
                        self.discard_claim();
                        return Err(LockError::io("link lock file", &self.lock_path, e));
                    }
                },
            }

            if let Some(deadline) = deadline
                && Instant::now() >= deadline
            {
                self.remove_claim()?;
                return Err(LockError::Timeout {
                    lock_path: self.lock_path.clone(),
                    waited: started.elapsed(),
                });
            }

            if self.lease_expired()? {
                self.break_lock()?;
                continue;
            }

            sleep_with_jitter();
        }
    }

    /// Acquire the lock and return a guard that releases it when dropped.
    pub fn acquire(&self, timeout: Option<Duration>) -> Result<LockGuard<'_>> {
        self.lock(timeout)?;
        Ok(LockGuard::new(self))
    }

    /// Release the lock.
    ///
    /// Fails with [`LockError::NotLocked`] if this instance does not hold the
    /// lock (unbalanced release, or the lease was broken), unless
    /// `unconditionally` is set. The claim file is removed either way.
    pub fn unlock(&self, unconditionally: bool) -> Result<()> {
        let held = self.locked()?;
        if !held && !unconditionally {
            return Err(LockError::NotLocked {
                lock_path: self.lock_path.clone(),
            });
        }

        if held {
            fsops::remove_ignoring_missing(&self.lock_path)
                .map_err(|e| LockError::io("remove lock file", &self.lock_path, e))?;
            debug!(lock = %self.lock_path.display(), claim = %self.claim_path.display(), "released lock");
        }

        self.remove_claim()
    }

    /// Inspect the current holder without renewing anything.
    pub fn holder(&self) -> Result<Option<HolderInfo>> {
        let Some(claim) = self.read_lock()? else {
            return Ok(None);
        };
        let Some(mtime) = self.lease_expiry()? else {
            return Ok(None);
        };

        Ok(Some(HolderInfo {
            claim: path_from_bytes(&claim),
            expires_at: DateTime::<Utc>::from(mtime),
        }))
    }

    /// Expiry instant of the current holder's lease, if the lock exists.
    pub fn lease_expiry(&self) -> Result<Option<SystemTime>> {
        fsops::modified(&self.lock_path)
            .map_err(|e| LockError::io("stat lock file", &self.lock_path, e))
    }

    fn is_own_claim(&self, content: Option<&[u8]>) -> bool {
        content == Some(self.claim_id.as_slice())
    }

    fn touch_claim(&self) -> Result<()> {
        fsops::touch(&self.claim_path, self.lifetime)
            .map_err(|e| LockError::io("touch claim file", &self.claim_path, e))
    }

    fn remove_claim(&self) -> Result<()> {
        fsops::remove_ignoring_missing(&self.claim_path)
            .map(|_| ())
            .map_err(|e| LockError::io("remove claim file", &self.claim_path, e))
    }

    /// Best-effort removal of our claim on a fatal path; the caller's error wins.
    fn discard_claim(&self) {
        if let Err(e) = fsops::remove_ignoring_missing(&self.claim_path) {
            warn!(claim = %self.claim_path.display(), error = %e, "failed to remove claim file");
        }
    }

    fn read_lock(&self) -> Result<Option<Vec<u8>>> {
        fsops::read_holder(&self.lock_path)
            .map_err(|e| LockError::io("read lock file", &self.lock_path, e))
    }

    fn lock_link_count(&self) -> Result<Option<u64>> {
        fsops::link_count(&self.lock_path)
            .map_err(|e| LockError::io("stat lock file", &self.lock_path, e))
    }

    fn lease_expired(&self) -> Result<bool> {
        Ok(self
            .lease_expiry()?
            .is_some_and(|expiry| expiry < SystemTime::now()))
    }

    /// Forcibly revoke an expired lease.
    ///
    /// Touching the lock first only discourages a second contender from
    /// breaking it at the same moment; two breakers can still race, and the
    /// loser simply retries the link.
    fn break_lock(&self) -> Result<()> {
        if let Err(e) = fsops::touch(&self.lock_path, self.lifetime)
            && FsErrorKind::of(&e) != FsErrorKind::PermissionDenied
        {
            return Err(LockError::io("touch lock file", &self.lock_path, e));
        }

        let stale = self
            .read_lock()?
            .filter(|s| !s.is_empty())
            .map(|s| path_from_bytes(&s));
        fsops::remove_ignoring_missing(&self.lock_path)
            .map_err(|e| LockError::io("remove lock file", &self.lock_path, e))?;
        warn!(
            lock = %self.lock_path.display(),
            holder = %stale.as_deref().unwrap_or(Path::new("<unknown>")).display(),
            "broke expired lock"
        );

        if let Some(stale) = stale
            && let Err(e) = fsops::remove_ignoring_missing(&stale)
        {
            warn!(claim = %stale.display(), error = %e, "failed to remove stale claim file");
        }
        Ok(())
    }
}

impl Drop for FileMutex {
    fn drop(&mut self) {
        if let Err(e) = self.unlock(true) {
            warn!(lock = %self.lock_path.display(), error = %e, "failed to release lock on drop");
        }
    }
}

fn sleep_with_jitter() {
    let millis = rand::thread_rng().gen_range(RETRY_SLEEP_MIN_MS..=RETRY_SLEEP_MAX_MS);
    thread::sleep(Duration::from_millis(millis));
}
