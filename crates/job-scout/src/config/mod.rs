use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "https://api.scrapingdog.com/google_jobs";
pub const DEFAULT_UPSTREAM_LANGUAGE: &str = "en_us";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub upstream: UpstreamConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            upstream: UpstreamConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection details for the upstream job-search API.
///
/// Handed to [`crate::search::SearchClient`] at construction so tests can point
/// the client at a local server.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub language: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = env::var("SCRAPINGDOG_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_ENDPOINT.to_string());
        let api_key = env::var("SCRAPINGDOG_API_KEY")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let language = env::var("SCRAPINGDOG_LANGUAGE")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_LANGUAGE.to_string());
        let timeout_secs = match env::var("SCRAPINGDOG_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            endpoint,
            api_key,
            language,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builds a config for an explicit endpoint and credential, keeping the
    /// default language and timeout.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: Some(api_key.into()),
            language: DEFAULT_UPSTREAM_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    MissingApiKey,
    HttpClient(reqwest::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "SCRAPINGDOG_TIMEOUT_SECS must be a positive number of seconds")
            }
            ConfigError::MissingApiKey => write!(f, "SCRAPINGDOG_API_KEY is not set"),
            ConfigError::HttpClient(err) => write!(f, "unable to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout | ConfigError::MissingApiKey => {
                None
            }
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::HttpClient(err) => Some(err),
        }
    }
}
