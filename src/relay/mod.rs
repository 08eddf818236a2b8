//! The mail relay pipeline.
//!
//! A mail read from the MTA goes through:
//! 1. a size check (`max_bytes`)
//! 2. spam-tag rejection (silently discarded)
//! 3. the serialization lock, so the endpoint sees one delivery at a time
//! 4. an HTTP POST to the endpoint
//!
//! The lock is held through a guard and released on every exit path.

mod deliver;
mod filter;
mod target;

pub use deliver::deliver;
pub use filter::{check_size, spam_match};
pub use target::Target;

use crate::config::Config;
use crate::error::Result;
use crate::locks::FileMutex;
use tracing::{debug, info, warn};

/// What happened to a mail that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Posted to the endpoint.
    Delivered,
    /// Matched a spam tag and was dropped on purpose.
    Discarded { tag: String },
}

/// Filter, serialize and deliver one mail to `url`.
pub fn relay(url: &str, mail: &[u8], config: &Config) -> Result<Outcome> {
    check_size(mail, config.max_bytes)?;

    let patterns = config.spam_patterns()?;
    if let Some(pattern) = spam_match(mail, &patterns) {
        warn!(tag = pattern.as_str(), "rejecting mail, matched spam tag");
        return Ok(Outcome::Discarded {
            tag: pattern.as_str().to_string(),
        });
    }

    let target = Target::parse(url, config.credentials());

    let mutex = config
        .use_locks
        .then(|| FileMutex::with_lifetime(&config.lock_file, config.lock_lifetime()));
    let _guard = match &mutex {
        Some(mutex) => {
            debug!(lock = %mutex.lock_path().display(), "waiting for serialization lock");
            Some(mutex.acquire(config.lock_timeout())?)
        }
        None => None,
    };

    deliver(
        &target,
        &config.mail_parameter_name,
        mail,
        config.request_timeout(),
    )?;
    info!(url = %target.url, "successfully handled incoming mail");
    Ok(Outcome::Delivered)
}
