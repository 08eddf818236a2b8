//! smtp2http: forward mail from an MTA pipe to an HTTP endpoint.
//!
//! The interesting part is [`locks`], an NFS-safe, lease-based file mutex
//! that serializes concurrent relay processes. The rest is a thin pipeline
//! around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod logging;
pub mod relay;

#[cfg(test)]
mod test_support;
