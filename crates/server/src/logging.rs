//! Tracing setup. Stdout carries the MCP protocol, so every log line goes to stderr.

use crate::cli::LogFormat;
use tracing_subscriber::EnvFilter;

/// # Errors
///
/// Returns an error if the filter directive is invalid or a global subscriber is already set.
pub fn init(log_level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(log_level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{log_level}': {e}"))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
