//! Structured logging initialization via `tracing`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering. Safe to call
/// more than once (tests from several crates may race to set it up); only
/// the first call installs the subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    });
}
