use crate::absence::CsvQuoting;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub scoring: ScoringSettings,
    pub export: ExportSettings,
    pub roster_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed = match non_empty_var("APP_SCORING_SEED") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value: raw })?,
            ),
            None => None,
        };

        let simulated_latency_ms = match non_empty_var("APP_SIMULATED_LATENCY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidLatency { value: raw })?,
            None => 0,
        };

        let csv_quoting = match non_empty_var("APP_CSV_QUOTING") {
            Some(raw) => raw
                .parse::<CsvQuoting>()
                .map_err(|_| ConfigError::InvalidCsvQuoting { value: raw })?,
            None => CsvQuoting::default(),
        };

        let roster_path = non_empty_var("APP_ROSTER_PATH").map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringSettings {
                seed,
                simulated_latency_ms,
            },
            export: ExportSettings { csv_quoting },
            roster_path,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Random source and simulated round trip of the prediction endpoint.
#[derive(Debug, Clone, Default)]
pub struct ScoringSettings {
    pub seed: Option<u64>,
    pub simulated_latency_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    pub csv_quoting: CsvQuoting,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSeed { value: String },
    InvalidLatency { value: String },
    InvalidCsvQuoting { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSeed { value } => {
                write!(f, "APP_SCORING_SEED must be a valid u64, got '{}'", value)
            }
            ConfigError::InvalidLatency { value } => write!(
                f,
                "APP_SIMULATED_LATENCY_MS must be a whole number of milliseconds, got '{}'",
                value
            ),
            ConfigError::InvalidCsvQuoting { value } => write!(
                f,
                "APP_CSV_QUOTING must be 'standard' or 'legacy', got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSeed { .. }
            | ConfigError::InvalidLatency { .. }
            | ConfigError::InvalidCsvQuoting { .. } => None,
        }
    }
}
