//! Store configuration loaded from the environment.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

/// Connection settings for the product store.
///
/// | Variable | Default |
/// |----------|---------|
/// | `STORE_BACKEND` | `memory` (`memory` or `postgres`) |
/// | `DATABASE_URL` | required for `postgres` |
/// | `DB_MAX_CONNECTIONS` | 10 |
/// | `DB_MIN_CONNECTIONS` | 2 |
/// | `DB_ACQUIRE_TIMEOUT_SECS` | 10 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") => defaults.backend,
            Some(v) if v.eq_ignore_ascii_case("memory") => StoreBackend::Memory,
            Some(v) if v.eq_ignore_ascii_case("postgres") => StoreBackend::Postgres,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    key: "STORE_BACKEND",
                    value: v.to_string(),
                });
            }
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?;
        let min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.min_connections)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }
        if min_connections > max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_MIN_CONNECTIONS",
                value: min_connections.to_string(),
            });
        }

        let acquire_timeout = Duration::from_secs(parse_or(
            &lookup,
            "DB_ACQUIRE_TIMEOUT_SECS",
            defaults.acquire_timeout.as_secs(),
        )?);

        Ok(Self {
            backend,
            database_url,
            max_connections,
            min_connections,
            acquire_timeout,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
