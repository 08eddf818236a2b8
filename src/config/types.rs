//! Configuration defaults for smtp2http.
//!
//! Default value functions used by serde and by `Config::default`.

use std::path::PathBuf;

/// Default spam tags: subject markers added by upstream filters.
pub fn default_spam_tags() -> Vec<String> {
    vec![r"\[SPAM\]".to_string(), r"\[VIRUS\]".to_string()]
}

/// Default lock location, shared by every invocation on this host.
pub fn default_lock_file() -> PathBuf {
    std::env::temp_dir().join("smtp2http.lock")
}

// Default value functions for serde
pub(crate) fn default_lock_timeout_secs() -> u64 {
    30
}
pub(crate) fn default_lock_lifetime_secs() -> u64 {
    90
}
pub(crate) fn default_mail_parameter_name() -> String {
    "Mail".to_string()
}
pub(crate) fn default_request_timeout_secs() -> u64 {
    60
}
pub(crate) fn default_true() -> bool {
    true
}
