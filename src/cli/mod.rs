//! CLI argument parsing for smtp2http.
//!
//! Uses clap derive macros for declarative argument definitions. The two
//! positional arguments keep the `smtp2http URL [MAXBYTES]` form MTA alias
//! files already use; everything else is an optional override.

use crate::config::Config;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// smtp2http: forward a mail read from stdin to an HTTP endpoint.
///
/// Deliveries from concurrent invocations are serialized through a lock
/// file that is safe on NFS.
#[derive(Parser, Debug)]
#[command(name = "smtp2http")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Endpoint the mail is posted to; may embed `user:password@`.
    pub url: String,

    /// Only forward mails of at most this many bytes (0 = unlimited).
    pub max_bytes: Option<u64>,

    /// YAML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Shared lock file serializing deliveries.
    #[arg(long, value_name = "PATH")]
    pub lock_file: Option<PathBuf>,

    /// Seconds to wait for the lock before requeueing (0 waits forever).
    #[arg(long, value_name = "SECS")]
    pub lock_timeout: Option<u64>,

    /// Seconds the lock may be held before others may break it.
    #[arg(long, value_name = "SECS")]
    pub lock_lifetime: Option<u64>,

    /// Deliver without serializing through the lock.
    #[arg(long)]
    pub no_lock: bool,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load the configuration and apply command line overrides.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(max_bytes) = self.max_bytes {
            config.max_bytes = max_bytes;
        }
        if let Some(lock_file) = &self.lock_file {
            config.lock_file = lock_file.clone();
        }
        if let Some(timeout) = self.lock_timeout {
            config.lock_timeout_secs = timeout;
        }
        if let Some(lifetime) = self.lock_lifetime {
            config.lock_lifetime_secs = lifetime;
        }
        if self.no_lock {
            config.use_locks = false;
        }

        config.validate()?;
        Ok(config)
    }
}
