use std::env::var;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{
    Layer, Registry, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

/// Install the global subscriber. `RUST_LOG` overrides `level`.
///
/// Panics if a global subscriber is already installed.
pub fn init(level: LevelFilter) {
    tracing_subscriber::registry().with(log_layer(level)).init();
}

/// Like [`init`], but reports an already installed subscriber as an error.
pub fn try_init(level: LevelFilter) -> Result<(), TryInitError> {
    tracing_subscriber::registry().with(log_layer(level)).try_init()
}

/// Compact human output, or JSON lines when `RUST_LOG_FORMAT=json`.
fn log_layer(level: LevelFilter) -> Box<dyn Layer<Registry> + Send + Sync> {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT")
        .inspect_err(|error| {
            warn!("Failed to read RUST_LOG_FORMAT, falling back to default: {error}")
        })
        .unwrap_or_default();

    match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_filter(env_filter)
            .boxed(),
    }
}
