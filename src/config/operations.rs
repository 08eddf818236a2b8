//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{RelayError, Result};
use regex::bytes::Regex;
use std::path::Path;
use std::time::Duration;

/// Longest lease a holder may ask for.
pub const MAX_LOCK_LIFETIME_SECS: u64 = 24 * 60 * 60;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| RelayError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RelayError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lock_lifetime_secs` must be positive and at most a day
    /// - with locking on, `request_timeout_secs` must be shorter than
    ///   `lock_lifetime_secs`, since the lease is not renewed mid-request
    /// - `mail_parameter_name` must be non-empty
    /// - `authorization` must be empty or `user:password`
    /// - every `spam_tags` entry must be a valid regex
    pub fn validate(&self) -> Result<()> {
        if self.lock_lifetime_secs == 0 {
            return Err(RelayError::Config(
                "config validation failed: lock_lifetime_secs must be greater than 0".to_string(),
            ));
        }

        if self.lock_lifetime_secs > MAX_LOCK_LIFETIME_SECS {
            return Err(RelayError::Config(format!(
                "config validation failed: lock_lifetime_secs must be at most {}",
                MAX_LOCK_LIFETIME_SECS
            )));
        }

        if self.use_locks && self.request_timeout_secs >= self.lock_lifetime_secs {
            return Err(RelayError::Config(format!(
                "config validation failed: request_timeout_secs ({}) must be less than lock_lifetime_secs ({})",
                self.request_timeout_secs, self.lock_lifetime_secs
            )));
        }

        if self.mail_parameter_name.trim().is_empty() {
            return Err(RelayError::Config(
                "config validation failed: mail_parameter_name must be non-empty".to_string(),
            ));
        }

        if !self.authorization.is_empty() && !self.authorization.contains(':') {
            return Err(RelayError::Config(
                "config validation failed: authorization must have the form 'user:password'"
                    .to_string(),
            ));
        }

        self.spam_patterns().map(|_| ())
    }

    /// Compile `spam_tags` into regexes.
    pub fn spam_patterns(&self) -> Result<Vec<Regex>> {
        self.spam_tags
            .iter()
            .map(|tag| {
                Regex::new(tag).map_err(|e| {
                    RelayError::Config(format!(
                        "config validation failed: invalid spam tag '{}': {}",
                        tag, e
                    ))
                })
            })
            .collect()
    }

    pub fn lock_timeout(&self) -> Option<Duration> {
        (self.lock_timeout_secs > 0).then(|| Duration::from_secs(self.lock_timeout_secs))
    }

    pub fn lock_lifetime(&self) -> Duration {
        Duration::from_secs(self.lock_lifetime_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured credentials split into user and password.
    pub fn credentials(&self) -> Option<(String, String)> {
        self.authorization
            .split_once(':')
            .map(|(user, password)| (user.to_string(), password.to_string()))
    }
}
