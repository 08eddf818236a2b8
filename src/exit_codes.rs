//! Exit code constants for smtp2http.
//!
//! The MTA piping mail into us interprets these (sysexits.h values):
//! - 0: Delivered, or silently discarded
//! - 1: Unrecoverable failure (bad config, lock I/O error)
//! - 64: Usage error (bad arguments)
//! - 67: Endpoint does not exist; the sender gets a bounce
//! - 75: Temporary failure; the MTA requeues and retries later
//! - 77: Mail rejected by policy (too large)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Unrecoverable failure that retrying will not fix.
pub const FAILURE: i32 = 1;

/// Command line usage error (EX_USAGE).
pub const USAGE: i32 = 64;

/// Addressee unknown (EX_NOUSER).
pub const NO_USER: i32 = 67;

/// Temporary failure, the MTA should retry (EX_TEMPFAIL).
pub const TEMP_FAIL: i32 = 75;

/// Permission denied (EX_NOPERM).
pub const NO_PERM: i32 = 77;
