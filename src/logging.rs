//! Logging setup.
//!
//! Output goes to stderr, which MTAs capture into the mail log.

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `-v` picks the default level; `RUST_LOG`, when set, replaces it.
pub fn init(verbose: bool) {
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose).from_env_lossy())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::INFO }
}

fn env_filter(verbose: bool) -> tracing_subscriber::filter::Builder {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level(verbose)).into())
}
