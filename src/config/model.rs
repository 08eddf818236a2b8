//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the relay.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Delivery settings
    // =========================================================================
    /// Basic-auth credentials as `user:password`, used when the URL carries none.
    #[serde(default)]
    pub authorization: String,

    /// Form field the mail is posted under.
    #[serde(default = "default_mail_parameter_name")]
    pub mail_parameter_name: String,

    /// Seconds before an HTTP request is abandoned.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // =========================================================================
    // Filter settings
    // =========================================================================
    /// Maximum mail size in bytes (0 means unlimited).
    #[serde(default)]
    pub max_bytes: u64,

    /// Regular expressions; a mail matching any of them is discarded silently.
    #[serde(default = "default_spam_tags")]
    pub spam_tags: Vec<String>,

    // =========================================================================
    // Lock settings
    // =========================================================================
    /// Whether deliveries are serialized through the lock file.
    #[serde(default = "default_true")]
    pub use_locks: bool,

    /// Shared lock path all relay processes race on.
    #[serde(default = "default_lock_file")]
    pub lock_file: PathBuf,

    /// Seconds to wait for the lock before requeueing (0 waits forever).
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,

    /// Seconds a holder is trusted before its lock may be broken.
    #[serde(default = "default_lock_lifetime_secs")]
    pub lock_lifetime_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authorization: String::new(),
            mail_parameter_name: default_mail_parameter_name(),
            request_timeout_secs: default_request_timeout_secs(),
            max_bytes: 0,
            spam_tags: default_spam_tags(),
            use_locks: default_true(),
            lock_file: default_lock_file(),
            lock_timeout_secs: default_lock_timeout_secs(),
            lock_lifetime_secs: default_lock_lifetime_secs(),
        }
    }
}
