use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration as StdDuration;

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

/// Top-level configuration for the scoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
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

        let event_window_days = match env::var("APP_EVENT_WINDOW_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|days| (1..=ScoringConfig::MAX_EVENT_WINDOW_DAYS).contains(days))
                .ok_or(ConfigError::InvalidEventWindow { value: raw })?,
            Err(_) => ScoringConfig::DEFAULT_EVENT_WINDOW_DAYS,
        };

        let recalculation_interval_secs = match env::var("APP_RECALC_INTERVAL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidRecalculationInterval { value: raw })?,
            Err(_) => 0,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                include_targets: environment != AppEnvironment::Production,
            },
            scoring: ScoringConfig {
                event_window_days,
                recalculation_interval_secs,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub include_targets: bool,
}

/// Knobs for the recalculation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Trailing window of events fed to the calculator.
    pub event_window_days: u32,
    /// Period of the background batch recalculation; zero disables it.
    pub recalculation_interval_secs: u64,
}

impl ScoringConfig {
    pub const DEFAULT_EVENT_WINDOW_DAYS: u32 = 90;
    /// About a century; wider windows can reach past the representable date range.
    pub const MAX_EVENT_WINDOW_DAYS: u32 = 36_500;

    pub fn event_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.event_window_days))
    }

    pub fn recalculation_interval(&self) -> Option<StdDuration> {
        (self.recalculation_interval_secs > 0)
            .then(|| StdDuration::from_secs(self.recalculation_interval_secs))
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            event_window_days: Self::DEFAULT_EVENT_WINDOW_DAYS,
            recalculation_interval_secs: 0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidEventWindow { value: String },
    InvalidRecalculationInterval { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEventWindow { value } => write!(
                f,
                "APP_EVENT_WINDOW_DAYS must be between 1 and {} days (got '{value}')",
                ScoringConfig::MAX_EVENT_WINDOW_DAYS
            ),
            ConfigError::InvalidRecalculationInterval { value } => write!(
                f,
                "APP_RECALC_INTERVAL_SECS must be a whole number of seconds (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidEventWindow { .. }
            | ConfigError::InvalidRecalculationInterval { .. } => None,
        }
    }
}
