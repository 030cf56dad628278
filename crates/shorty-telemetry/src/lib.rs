//! Process-wide tracing setup shared by the Shorty binaries.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to bridge `log` records into tracing: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("unknown log format '{0}', expected 'text' or 'json'")]
    UnknownFormat(String),
}

/// Output format of the `fmt` layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, ANSI colored lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Builds the event filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVE`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber and routes `log` records (e.g. from sqlx)
/// through it. Call once, at the top of `main`.
pub fn init(format: LogFormat) -> Result<(), Error> {
    tracing_log::LogTracer::init()?;

    let registry = tracing_subscriber::registry().with(env_filter());
    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(registry.with(fmt::layer()))?,
        LogFormat::Json => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))?
        }
    }

    Ok(())
}
