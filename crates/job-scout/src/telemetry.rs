use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    /// `APP_LOG_LEVEL` is not a valid filter directive.
    LogLevel { directive: String, source: ParseError },
    /// A global subscriber was already installed.
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::LogLevel { directive, source } => {
                write!(f, "APP_LOG_LEVEL '{directive}' is not a usable log filter: {source}")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "log subscriber could not be installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::LogLevel { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    // RUST_LOG wins over the configured level when it parses.
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::LogLevel {
        directive: config.log_level.clone(),
        source,
    })
}

/// Installs the global subscriber. Logs go to stderr so the `search` command
/// can keep stdout for its result table.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
