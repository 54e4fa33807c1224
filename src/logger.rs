//! Tracing subscriber setup driven by [`config::Logger`].
//!
//! Hosts that already install their own subscriber can skip this module: the
//! reasoner only emits `tracing` events and never requires a subscriber.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{self, ConfigError, LogFormat};

const MODULE_WHITELIST: &[&str] = &["rdfs_reasoner"];

/// Builds the filter directive for `config`.
///
/// `RUST_LOG` wins over everything, then `override_filter`, then the
/// configured level scoped to this crate.
pub fn filter_directive(config: &config::Logger) -> String {
    if let Ok(from_env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        return from_env;
    }
    config.override_filter.clone().unwrap_or_else(|| {
        MODULE_WHITELIST
            .iter()
            .map(|module| format!("{module}={}", config.level))
            .collect::<Vec<_>>()
            .join(",")
    })
}

/// Installs a global subscriber according to `config`.
///
/// Returns `Ok(false)` when logging is disabled or another subscriber is
/// already installed.
///
/// # Errors
///
/// Fails when the resulting filter directive does not parse.
pub fn init(config: &config::Logger) -> Result<bool, ConfigError> {
    if !config.enable {
        return Ok(false);
    }

    let directive = filter_directive(config);
    let filter = EnvFilter::try_new(&directive).map_err(|err| ConfigError::Filter {
        filter: directive.clone(),
        reason: err.to_string(),
    })?;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Compact => fmt::layer().compact().with_filter(filter).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_filter(filter).boxed(),
        LogFormat::Json => fmt::layer().json().with_filter(filter).boxed(),
    };

    Ok(tracing_subscriber::registry().with(layer).try_init().is_ok())
}
