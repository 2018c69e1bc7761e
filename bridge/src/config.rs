// File: bridge/src/config.rs
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::server;
use crate::errors::ConfigError;

/// Runtime settings for the bridge process.
///
/// The bind host is deliberately not configurable: the server only ever
/// listens on loopback.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub port: u16,
    pub static_dir: String,
    pub request_timeout_seconds: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: server::DEFAULT_PORT,
            static_dir: server::DEFAULT_STATIC_DIR.to_string(),
            request_timeout_seconds: 300,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from an optional TOML file, then apply
    /// environment overrides (`WALLET_BRIDGE_PORT`, `WALLET_BRIDGE_UI_DIR`).
    /// A missing file is not an error; defaults apply.
    pub async fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = if Path::new(path).exists() {
            let content =
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| ConfigError::LoadFailed {
                        path: path.to_string(),
                        reason: e.to_string(),
                    })?;

            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_string(),
                reason: e.to_string(),
            })?
        } else {
            debug!("No config file at {}, using defaults", path);
            Self::default()
        };

        if let Ok(port) = std::env::var("WALLET_BRIDGE_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                field: "WALLET_BRIDGE_PORT".to_string(),
                reason: format!("'{}' is not a valid port number", port),
            })?;
        }

        if let Ok(dir) = std::env::var("WALLET_BRIDGE_UI_DIR") {
            config.static_dir = dir;
        }

        if config.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        info!(
            "Configuration loaded: port {}, UI dir '{}', {}s request timeout",
            config.port, config.static_dir, config.request_timeout_seconds
        );
        Ok(config)
    }
}
