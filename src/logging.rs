//! Tracing setup for the command-line tool

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING_INIT: Once = Once::new();

/// Default filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "taskrouter=info,taskrouter_core=info";

/// Initialize tracing subscriber (only once)
///
/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
            ))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}
