use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::dol::UnresolvedLocationPolicy;

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
    pub analysis: AnalysisConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

const DEFAULT_MAX_BATCH_SIZE: usize = 500;

/// Knobs for the date-of-loss analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub unresolved_location: UnresolvedLocationPolicy,
    pub parallel_batches: bool,
    pub max_batch_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            unresolved_location: UnresolvedLocationPolicy::Exclude,
            parallel_batches: true,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl AnalysisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let unresolved_location = match env::var("DOL_UNRESOLVED_LOCATION") {
            Ok(raw) => UnresolvedLocationPolicy::parse(&raw)
                .ok_or(ConfigError::InvalidUnresolvedPolicy { value: raw })?,
            Err(_) => defaults.unresolved_location,
        };

        let parallel_batches = match env::var("DOL_PARALLEL_BATCHES") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "DOL_PARALLEL_BATCHES",
                value: raw,
            })?,
            Err(_) => defaults.parallel_batches,
        };

        let max_batch_size = match env::var("DOL_MAX_BATCH_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidBatchSize)?,
            Err(_) => defaults.max_batch_size,
        };

        Ok(Self {
            unresolved_location,
            parallel_batches,
            max_batch_size,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUnresolvedPolicy { value: String },
    InvalidFlag { name: &'static str, value: String },
    InvalidBatchSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUnresolvedPolicy { value } => write!(
                f,
                "DOL_UNRESOLVED_LOCATION must be 'exclude' or 'score_as_distant' (found '{}')",
                value
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{} must be a boolean flag (found '{}')", name, value)
            }
            ConfigError::InvalidBatchSize => {
                write!(f, "DOL_MAX_BATCH_SIZE must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidUnresolvedPolicy { .. }
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidBatchSize => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("DOL_UNRESOLVED_LOCATION");
        env::remove_var("DOL_PARALLEL_BATCHES");
        env::remove_var("DOL_MAX_BATCH_SIZE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_analysis_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DOL_UNRESOLVED_LOCATION", "score_as_distant");
        env::set_var("DOL_PARALLEL_BATCHES", "off");
        env::set_var("DOL_MAX_BATCH_SIZE", "25");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.analysis.unresolved_location,
            UnresolvedLocationPolicy::ScoreAsDistant
        );
        assert!(!config.analysis.parallel_batches);
        assert_eq!(config.analysis.max_batch_size, 25);
        reset_env();
    }

    #[test]
    fn rejects_unknown_unresolved_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DOL_UNRESOLVED_LOCATION", "guess");

        match AppConfig::load() {
            Err(ConfigError::InvalidUnresolvedPolicy { value }) => assert_eq!(value, "guess"),
            other => panic!("expected policy error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_zero_batch_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DOL_MAX_BATCH_SIZE", "0");

        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidBatchSize)
        ));
        reset_env();
    }
}
