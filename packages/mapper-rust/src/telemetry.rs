//! Tracing subscriber bootstrap for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

use crate::config::TracingConfig;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over [`TracingConfig::filter`].
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
