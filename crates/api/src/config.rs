//! Process configuration read once at startup.

use std::net::SocketAddr;

use storefront_infra::{ConfigError, StoreConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `BIND_ADDR`, default `0.0.0.0:8080`.
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup("BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: raw.clone(),
        })?;

        Ok(Self {
            bind_addr,
            store: StoreConfig::from_lookup(&lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.store, StoreConfig::default());
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = AppConfig::from_lookup(|key| (key == "BIND_ADDR").then(|| "nowhere".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid { key: "BIND_ADDR", value: "nowhere".to_string() }
        );
    }
}
