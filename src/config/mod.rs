//! Configuration model for smtp2http.
//!
//! This module defines the Config struct read from an optional YAML file.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use operations::MAX_LOCK_LIFETIME_SECS;
