//! Logging and tracing setup
//!
//! The client only emits `tracing` events; binaries embedding it call
//! [`init_tracing`] once at startup to install a subscriber. `RUST_LOG`
//! overrides the configured level when it is set.

use storefront_domain::{LoggingConfig, Result, StorefrontError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `config.level`.
///
/// # Errors
/// Returns `StorefrontError::Config` if the configured directive is invalid.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            StorefrontError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global tracing subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, so calling
/// this from tests or from several entry points is harmless.
///
/// # Errors
/// Returns `StorefrontError::Config` if the log level cannot be parsed.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .is_ok()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
    }
    Ok(installed)
}
