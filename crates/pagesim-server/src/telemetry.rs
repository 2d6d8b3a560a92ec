//! Structured logging setup.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter: `RUST_LOG` wins, then `level`, then `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize structured logging for the binary.
pub fn init_tracing(level: &str) -> Result<()> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize tracing: {}", e))?;

    tracing::debug!(log_level = %level, "Tracing initialized");
    Ok(())
}
