//! Pre-delivery checks on the raw mail.

use crate::error::{RelayError, Result};
use regex::bytes::Regex;

/// Reject mail larger than `limit` bytes. A limit of 0 disables the check.
pub fn check_size(mail: &[u8], limit: u64) -> Result<()> {
    if limit > 0 && mail.len() as u64 > limit {
        return Err(RelayError::TooLarge {
            size: mail.len(),
            limit,
        });
    }
    Ok(())
}

/// First spam pattern found anywhere in the mail, if any.
pub fn spam_match<'a>(mail: &[u8], patterns: &'a [Regex]) -> Option<&'a Regex> {
    patterns.iter().find(|pattern| pattern.is_match(mail))
}
