//! Configuration loading
//!
//! Reads an optional TOML file; every key has a default so the server can
//! start with no file at all.

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_LISTEN: &str = "127.0.0.1:6667";

/// Longest server name kept from the config
pub const MAX_SERVER_NAME_LEN: usize = 64;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the TCP listener binds to.
    pub listen: String,
    /// Server identity advertised in the welcome burst.
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.server.name = config
            .server
            .name
            .chars()
            .take(MAX_SERVER_NAME_LEN)
            .collect();
        Ok(config)
    }
}

/// Server identity, fixed for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Human-readable server name.
    pub name: String,
    /// Host identifier used as the prefix of server replies.
    pub host: String,
    /// Version string for RPL_YOURHOST and RPL_MYINFO.
    pub version: String,
    /// Creation timestamp for RPL_CREATED.
    pub created: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "My Server".to_string(),
            host: "localhost".to_string(),
            version: format!("{}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            created: Utc::now().format("%a %b %d %Y at %H:%M:%S UTC").to_string(),
        }
    }
}
