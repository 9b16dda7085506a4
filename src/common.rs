//! Common methods
//!
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Enable logging for the test run.
///
/// Filter is taken from `RUST_LOG` (default "info"). Calling it again is a
/// no-op, so every test may call it.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
