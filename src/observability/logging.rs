//! Structured logging.
//!
//! # Design Decisions
//! - `tracing` for structured fields throughout the host
//! - `EnvFilter` so verbosity is tunable via `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Library embedders normally install their own subscriber; this is a
/// convenience for binaries with a `fluent_host=info` default filter.
/// Panics if a global subscriber is already set.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluent_host=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
