use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::workflows::lending::applications::{RiskRubric, RubricError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the intake service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub risk: RiskConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rubric = match env::var("LOAN_RISK_RUBRIC") {
            Ok(path) if !path.trim().is_empty() => load_rubric(Path::new(path.trim()))?,
            _ => RiskRubric::default(),
        };

        let seed_samples = match env::var("LOAN_SEED_SAMPLES") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidSeedCount(raw))?,
            Err(_) => 0,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            risk: RiskConfig {
                rubric,
                seed_samples,
            },
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

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring calibration and portfolio seeding.
#[derive(Debug, Clone)]
pub struct RiskConfig {
    pub rubric: RiskRubric,
    /// Synthetic applications to load into the portfolio at startup.
    pub seed_samples: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            rubric: RiskRubric::default(),
            seed_samples: 0,
        }
    }
}

/// Read a JSON rubric and reject calibrations that break tier exclusivity.
pub fn load_rubric(path: &Path) -> Result<RiskRubric, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::RubricIo {
        path: path.to_path_buf(),
        source,
    })?;

    let rubric: RiskRubric =
        serde_json::from_str(&raw).map_err(|source| ConfigError::RubricParse {
            path: path.to_path_buf(),
            source,
        })?;

    rubric.validate().map_err(ConfigError::InvalidRubric)?;
    Ok(rubric)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidSeedCount(String),
    RubricIo {
        path: PathBuf,
        source: std::io::Error,
    },
    RubricParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidRubric(RubricError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSeedCount(raw) => {
                write!(f, "LOAN_SEED_SAMPLES must be a non-negative integer (found '{raw}')")
            }
            ConfigError::RubricIo { path, .. } => {
                write!(f, "unable to read risk rubric at {}", path.display())
            }
            ConfigError::RubricParse { path, .. } => {
                write!(f, "risk rubric at {} is not valid JSON", path.display())
            }
            ConfigError::InvalidRubric(err) => write!(f, "invalid risk rubric: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSeedCount(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::RubricIo { source, .. } => Some(source),
            ConfigError::RubricParse { source, .. } => Some(source),
            ConfigError::InvalidRubric(err) => Some(err),
        }
    }
}
