//! Error types for the smtp2http CLI.
//!
//! Uses thiserror for derive macros. Every variant maps to the exit code the
//! MTA expects, so the caller's only job is to print and exit.

use crate::exit_codes;
use crate::locks::LockError;
use thiserror::Error;

/// Main error type for relay operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Invalid command line arguments.
    #[error("{0}")]
    Usage(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The mail could not be read from standard input.
    #[error("Failed to read mail: {0}")]
    Input(String),

    /// The mail exceeds the configured size limit.
    #[error("Rejecting mail of {size} bytes (limit {limit} bytes)")]
    TooLarge { size: usize, limit: u64 },

    /// The endpoint answered 404.
    #[error("URL at {0} doesn't exist")]
    NoUser(String),

    /// Delivery failed in a way that may succeed later.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Serialization lock could not be obtained or released.
    #[error("Lock failed: {0}")]
    Lock(#[from] LockError),
}

impl RelayError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RelayError::Usage(_) => exit_codes::USAGE,
            RelayError::Config(_) => exit_codes::FAILURE,
            RelayError::Input(_) => exit_codes::FAILURE,
            RelayError::TooLarge { .. } => exit_codes::NO_PERM,
            RelayError::NoUser(_) => exit_codes::NO_USER,
            RelayError::Delivery(_) => exit_codes::TEMP_FAIL,
            RelayError::Lock(e) if e.is_temporary() => exit_codes::TEMP_FAIL,
            RelayError::Lock(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn usage_error_has_correct_exit_code() {
        let err = RelayError::Usage("missing URL".to_string());
        assert_eq!(err.exit_code(), exit_codes::USAGE);
    }

    #[test]
    fn too_large_is_rejected_permanently() {
        let err = RelayError::TooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(err.exit_code(), exit_codes::NO_PERM);
        assert_eq!(
            err.to_string(),
            "Rejecting mail of 2048 bytes (limit 1024 bytes)"
        );
    }

    #[test]
    fn missing_endpoint_bounces() {
        let err = RelayError::NoUser("http://example.org/box".to_string());
        assert_eq!(err.exit_code(), exit_codes::NO_USER);
    }

    #[test]
    fn delivery_error_is_temporary() {
        let err = RelayError::Delivery("connection refused".to_string());
        assert_eq!(err.exit_code(), exit_codes::TEMP_FAIL);
    }

    #[test]
    fn lock_timeout_is_temporary() {
        let err = RelayError::from(LockError::Timeout {
            lock_path: PathBuf::from("/tmp/smtp2http.lock"),
            waited: Duration::from_secs(30),
        });
        assert_eq!(err.exit_code(), exit_codes::TEMP_FAIL);
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn lock_io_error_is_fatal() {
        let err = RelayError::from(LockError::Io {
            op: "link lock file",
            path: PathBuf::from("/tmp/smtp2http.lock"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
    }
}
