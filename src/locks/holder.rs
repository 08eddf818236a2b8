//! Read-only view of whoever currently holds a lock.

use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

/// Snapshot of the current lock holder.
///
/// Built from the lock path's content and modification time. It performs
/// no renewal, so it is safe to inspect a lock owned by someone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderInfo {
    /// Claim file of the holder, as recorded in the lock path.
    pub claim: PathBuf,

    /// Instant the holder's lease runs out.
    pub expires_at: DateTime<Utc>,
}

impl HolderInfo {
    /// Time left on the lease; negative once expired.
    pub fn remaining(&self) -> Duration {
        self.expires_at.signed_duration_since(Utc::now())
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }

    /// Format the remaining lease as a human-readable string.
    pub fn remaining_string(&self) -> String {
        let remaining = self.remaining();
        if remaining < Duration::zero() {
            return format!("expired {}s ago", -remaining.num_seconds());
        }

        let minutes = remaining.num_minutes();
        if minutes > 0 {
            format!("{}m {}s", minutes, remaining.num_seconds() % 60)
        } else {
            format!("{}s", remaining.num_seconds())
        }
    }
}

impl std::fmt::Display for HolderInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (lease: {}{})",
            self.claim.display(),
            self.remaining_string(),
            if self.is_expired() { ", STALE" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder_expiring_in(delta: Duration) -> HolderInfo {
        HolderInfo {
            claim: PathBuf::from("/tmp/x.lock.host.42.0"),
            expires_at: Utc::now() + delta,
        }
    }

    #[test]
    fn fresh_lease_is_not_expired() {
        let holder = holder_expiring_in(Duration::seconds(90));
        assert!(!holder.is_expired());
        assert!(holder.remaining_string().starts_with("1m"));
        assert!(!holder.to_string().contains("STALE"));
    }

    #[test]
    fn old_lease_is_reported_stale() {
        let holder = holder_expiring_in(Duration::seconds(-10));
        assert!(holder.is_expired());
        assert!(holder.remaining_string().starts_with("expired"));

        let rendered = holder.to_string();
        assert!(rendered.contains("/tmp/x.lock.host.42.0"));
        assert!(rendered.contains("STALE"));
    }
}
