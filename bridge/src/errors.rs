//! Custom error types for the wallet bridge
//!
//! Expected races inside the registry are communicated through boolean
//! returns, not errors; only configuration and startup failures surface
//! through these types.

use std::fmt;

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { path, reason } => {
                write!(f, "Failed to parse config '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
