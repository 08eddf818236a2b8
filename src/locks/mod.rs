//! NFS-safe file locking with leases and timeouts.
//!
//! Concurrent relay invocations, possibly on several hosts sharing one
//! filesystem, serialize on a single lock path.
//!
//! # Protocol
//!
//! Each [`FileMutex`] writes a private claim file named
//! `<lock>.<host>.<pid>.<counter>` containing its own path, then tries to
//! hard-link it to the lock path. Hard-link creation is atomic even on
//! network filesystems where exclusive create is not, so:
//! - a successful link means the lock was free and is now ours;
//! - "already exists" means someone may hold it: the lock's inode must show
//!   exactly two links and the lock content names the holder's claim file.
//!
//! # Leases
//!
//! The claim file's mtime is set to `now + lifetime` on every status check.
//! Because the claim and the lock share an inode, the lock path's mtime is
//! the holder's lease expiry. A contender that sees the expiry in the past
//! breaks the lock by deleting the lock path and the stale claim.
//!
//! # RAII Guards
//!
//! [`FileMutex::acquire`] returns a [`LockGuard`] that releases the lock on
//! every exit path. Dropping the mutex itself also releases it. Releasing
//! twice is a no-op.

mod claim;
mod error;
pub mod fsops;
mod guard;
mod holder;
mod mutex;


// Re-export public API
pub use error::{LockError, Result};
pub use guard::LockGuard;
pub use holder::HolderInfo;
pub use mutex::{DEFAULT_LOCK_LIFETIME, FileMutex};
