//! Runtime configuration, read from YAML.
//!
//! ```yaml
//! channel_buffer: 64
//! log_filter: "order_service=debug,info"
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the YAML file [`SystemConfig::load`] reads.
pub const CONFIG_ENV: &str = "ORDER_SERVICE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl SystemConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// `channel_buffer` must be non-zero; a bounded channel cannot have zero capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid(
                "channel_buffer must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads the file named by `ORDER_SERVICE_CONFIG`, or returns defaults when it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SystemConfig::default();
        assert_eq!(config.channel_buffer, 32);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SystemConfig::from_yaml("channel_buffer: 8\n").unwrap();
        assert_eq!(config.channel_buffer, 8);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_bad_yaml() {
        let err = SystemConfig::from_yaml("channel_buffer: lots\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_channel_buffer_is_rejected() {
        let err = SystemConfig::from_yaml("channel_buffer: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("channel_buffer"));
    }

    #[test]
    fn test_missing_file() {
        let err = SystemConfig::from_file("/nonexistent/order-service.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
