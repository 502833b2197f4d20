//! Gateway configuration.

use std::env;
use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Errors raised while reading gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SUPERVISOR_API_ADDR {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Listen address and optional bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub addr: SocketAddr,
    pub api_token: Option<String>,
}

impl ApiConfig {
    /// Read `SUPERVISOR_API_ADDR` and `SUPERVISOR_API_TOKEN`.
    ///
    /// A blank token disables auth.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = env::var("SUPERVISOR_API_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: value.clone(),
                source,
            })?;

        let api_token = env::var("SUPERVISOR_API_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(Self { addr, api_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::remove_var("SUPERVISOR_API_ADDR");
        std::env::remove_var("SUPERVISOR_API_TOKEN");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert!(config.api_token.is_none());

        std::env::set_var("SUPERVISOR_API_ADDR", "0.0.0.0:9100");
        std::env::set_var("SUPERVISOR_API_TOKEN", "  ");
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.addr.port(), 9100);
        assert!(config.api_token.is_none());

        std::env::set_var("SUPERVISOR_API_TOKEN", "secret");
        assert_eq!(ApiConfig::from_env().unwrap().api_token.as_deref(), Some("secret"));

        std::env::set_var("SUPERVISOR_API_ADDR", "localhost");
        assert!(matches!(
            ApiConfig::from_env(),
            Err(ConfigError::InvalidAddr { .. })
        ));

        std::env::remove_var("SUPERVISOR_API_ADDR");
        std::env::remove_var("SUPERVISOR_API_TOKEN");
    }
}
