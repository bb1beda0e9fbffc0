//! Runtime configuration read from the environment (and `.env` via dotenvy).

use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TEAM_LOOKUP_URL: &str =
    "https://www.thesportsdb.com/api/v1/json/3/searchteams.php";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the third-party team logo lookup
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Extra attempts after the first one, for connection faults and 429s only
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub rate_limit_delay: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TEAM_LOOKUP_URL.to_string(),
            timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_delay: Duration::from_millis(1000),
            rate_limit_delay: Duration::from_millis(20_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: Ipv4Addr,
    pub port: u16,
    pub lookup: LookupConfig,
}

impl LookupConfig {
    /// Lookup settings from `TEAM_LOOKUP_URL` and the `LOOKUP_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            base_url: std::env::var("TEAM_LOOKUP_URL").unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(parse_var(
                "LOOKUP_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
            max_retries: parse_var("LOOKUP_MAX_RETRIES", defaults.max_retries)?,
            retry_delay: Duration::from_millis(parse_var(
                "LOOKUP_RETRY_DELAY_MS",
                millis(defaults.retry_delay),
            )?),
            rate_limit_delay: Duration::from_millis(parse_var(
                "LOOKUP_RATE_LIMIT_DELAY_MS",
                millis(defaults.rate_limit_delay),
            )?),
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://database.db".to_string()),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            host: parse_var("HOST", Ipv4Addr::LOCALHOST)?,
            port: parse_var("PORT", 8000)?,
            lookup: LookupConfig::from_env()?,
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
