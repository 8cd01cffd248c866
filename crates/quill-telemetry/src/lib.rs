//! Logging for Quill
//!
//! Installs a `tracing-subscriber` registry that writes to stderr, leaving
//! stdout for command output.

use quill_config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when the configured directive does not parse
const FALLBACK_FILTER: &str = "warn";

/// Initialize logging from configuration
///
/// `RUST_LOG`, when set, takes precedence over the configured filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    let fmt_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}
