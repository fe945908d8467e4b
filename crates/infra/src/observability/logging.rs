//! Tracing subscriber setup

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use umsync_domain::{Result, SyncError};

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "UMSYNC_LOG_FORMAT";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log aggregation.
    Json,
}

impl FromStr for LogFormat {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SyncError::Config(format!("Unknown log format: {other}"))),
        }
    }
}

impl LogFormat {
    /// Format named by `UMSYNC_LOG_FORMAT`, text when unset.
    pub fn from_env() -> Result<Self> {
        std::env::var(LOG_FORMAT_ENV).map_or(Ok(Self::Text), |value| value.parse())
    }
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_filter`
/// (for example `"info"`).
///
/// # Errors
/// Returns `SyncError::Config` for an invalid filter and
/// `SyncError::Internal` if a subscriber is already installed.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| SyncError::Config(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).flatten_event(true).with_current_span(true))
            .try_init(),
    };

    installed.map_err(|e| SyncError::Internal(format!("Failed to install log subscriber: {e}")))?;
    tracing::debug!(?format, "Logging initialized");
    Ok(())
}
