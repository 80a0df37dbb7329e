//! `tracing-subscriber` setup. `RUST_LOG` takes precedence over the defaults below.

use tracing_subscriber::EnvFilter;

/// Compact output without timestamps, defaults to `debug`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(env_filter("debug"))
        .compact()
        .init();
}

/// Full output with timestamps, defaults to `info`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter("info"))
        .init();
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
