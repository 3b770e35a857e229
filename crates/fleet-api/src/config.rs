//! # API Configuration
//!
//! Environment-based configuration for the fleet API service.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use fleet_simulator::SimulationConfig;

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// Maximum query depth
    pub max_query_depth: usize,

    /// Maximum query complexity
    pub max_query_complexity: usize,

    /// Simulation engine configuration
    pub simulation: SimulationConfig,

    /// Simulated request latency and failures
    pub faults: FaultConfig,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// Simulated network behavior applied in front of the engine
#[derive(Debug, Clone, PartialEq)]
pub struct FaultConfig {
    /// Probability (0-1) that a request fails with a transient fault
    pub failure_rate: f64,
    pub latency_min: Duration,
    pub latency_max: Duration,
}

impl FaultConfig {
    /// No latency, no failures
    pub const fn disabled() -> Self {
        Self {
            failure_rate: 0.0,
            latency_min: Duration::ZERO,
            latency_max: Duration::ZERO,
        }
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SimulationConfig::default();

        let latency_min = Duration::from_millis(parse_var("SIM_LATENCY_MIN_MS", 0)?);
        let latency_max = Duration::from_millis(parse_var("SIM_LATENCY_MAX_MS", 0)?);

        Ok(Self {
            server_addr: parse_var("SERVER_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,

            max_query_depth: parse_var("MAX_QUERY_DEPTH", 10)?,

            max_query_complexity: parse_var("MAX_QUERY_COMPLEXITY", 1000)?,

            simulation: SimulationConfig {
                seed: env::var("SIM_SEED").ok().map(|v| parse_value("SIM_SEED", &v)).transpose()?,
                drone_count: parse_var("SIM_DRONE_COUNT", defaults.drone_count)?,
                mission_count: parse_var("SIM_MISSION_COUNT", defaults.mission_count)?,
                tick_interval: tick_interval(parse_var("SIM_TICK_MS", 1000)?)?,
                ..defaults
            },

            faults: FaultConfig {
                failure_rate: parse_var("SIM_FAULT_RATE", 0.0_f64)?.clamp(0.0, 1.0),
                latency_min,
                latency_max: latency_max.max(latency_min),
            },

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_query_depth: 10,
            max_query_complexity: 1000,
            simulation: SimulationConfig::default(),
            faults: FaultConfig::disabled(),
            log_level: "info".to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Tick period from milliseconds; zero is rejected
fn tick_interval(ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError {
            key: "SIM_TICK_MS",
            value: ms.to_string(),
        });
    }
    Ok(Duration::from_millis(ms))
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => parse_value(key, &value),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        key,
        value: value.to_string(),
    })
}
