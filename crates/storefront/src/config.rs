//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOOSTLINE_DATA_DIR` - Directory for the JSON document store (default: ./data)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_POLL_INTERVAL_SECS` - Order-feed polling cadence (default: 5)
//! - `ANTHROPIC_API_KEY` - API key for the tips assistant; tips degrade to a
//!   static fallback without it
//! - `BOOSTLINE_TIPS_MODEL` - Model for the tips assistant (default: claude-haiku-4-5)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default polling cadence for the active-order feed, in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the JSON document store.
    pub data_dir: PathBuf,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Polling cadence for the active-order feed. This is the system's sole
    /// update mechanism; there is no push channel behind it.
    pub poll_interval: Duration,
    /// Tips assistant configuration.
    pub tips: TipsConfig,
}

/// Tips assistant configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct TipsConfig {
    /// Anthropic API key. Absent means the assistant is disabled and every
    /// request gets the static fallback.
    pub api_key: Option<SecretString>,
    /// Model identifier.
    pub model: String,
}

impl std::fmt::Debug for TipsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TipsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("BOOSTLINE_DATA_DIR", "./data"));
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let poll_secs = get_env_or_default(
            "STOREFRONT_POLL_INTERVAL_SECS",
            &DEFAULT_POLL_INTERVAL_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_POLL_INTERVAL_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            data_dir,
            host,
            port,
            poll_interval: Duration::from_secs(poll_secs.max(1)),
            tips: TipsConfig::from_env(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TipsConfig {
    fn from_env() -> Self {
        Self {
            api_key: get_optional_env("ANTHROPIC_API_KEY").map(SecretString::from),
            model: get_env_or_default("BOOSTLINE_TIPS_MODEL", "claude-haiku-4-5"),
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            data_dir: PathBuf::from("./data"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            poll_interval: Duration::from_secs(5),
            tips: TipsConfig {
                api_key: None,
                model: "claude-haiku-4-5".to_string(),
            },
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_tips_config_debug_redacts_key() {
        let config = TipsConfig {
            api_key: Some(SecretString::from("sk-ant-super-secret")),
            model: "claude-haiku-4-5".to_string(),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("sk-ant-super-secret"));
    }
}
