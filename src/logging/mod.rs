//! Logging setup
//!
//! Production writes one JSON object per event; anything else gets colored
//! human-readable lines. `RUST_LOG` overrides the default `info` filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{get_environment, is_production};

pub fn init_logging() {
    init_logging_for(&get_environment());
}

/// Install the global subscriber for `environment`. A second call is a no-op.
pub fn init_logging_for(environment: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if is_production(environment) {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
