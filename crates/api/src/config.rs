use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use quotes_db::PoolConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error("DB_MIN_CONNECTIONS ({min}) must not exceed DB_MAX_CONNECTIONS ({max})")]
    PoolBounds { min: u32, max: u32 },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Storage connection string.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Query catalog definition file (default: `dbqueries.json`).
    pub catalog_path: PathBuf,
    /// Directory of picture assets served under `/pictures` (default: `pictures`).
    pub pictures_dir: PathBuf,
    /// Connection pool limits; `acquire_timeout` is also the dispatcher deadline.
    pub pool: PoolConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `DATABASE_URL`            | (required)              |
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `4000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `QUERY_CATALOG_PATH`      | `dbqueries.json`        |
    /// | `PICTURES_DIR`            | `pictures`              |
    /// | `DB_MIN_CONNECTIONS`      | `1`                     |
    /// | `DB_MAX_CONNECTIONS`      | `20`                    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`                    |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `600`                   |
    /// | `DB_MAX_LIFETIME_SECS`    | `1800`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::InvalidOrigin(bad.clone()));
        }

        let defaults = PoolConfig::default();
        let pool = PoolConfig {
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.min_connections)?,
            max_connections: parse_positive(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            acquire_timeout: secs_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout)?,
            idle_timeout: secs_or(&lookup, "DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout)?,
            max_lifetime: secs_or(&lookup, "DB_MAX_LIFETIME_SECS", defaults.max_lifetime)?,
        };
        if pool.min_connections > pool.max_connections {
            return Err(ConfigError::PoolBounds {
                min: pool.min_connections,
                max: pool.max_connections,
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 4000)?,
            database_url,
            cors_origins,
            request_timeout_secs: parse_positive(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            catalog_path: lookup("QUERY_CATALOG_PATH")
                .unwrap_or_else(|| "dbqueries.json".into())
                .into(),
            pictures_dir: lookup("PICTURES_DIR")
                .unwrap_or_else(|| "pictures".into())
                .into(),
            pool,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_positive<T: FromStr + PartialEq + Default>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let value = parse_or(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: lookup(key).unwrap_or_default(),
        });
    }
    Ok(value)
}

fn secs_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    parse_positive(lookup, key, default.as_secs()).map(Duration::from_secs)
}
