//! Configuration management for the ricrob-task binary
//!
//! This module handles loading and validating the binary's own settings
//! (logging, HTTP server, board layout) from environment variables and
//! TOML files. Task parameters are not part of it; see [`crate::params`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env::VarError;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::board::Layout;

/// Environment variables read by [`Config::from_env`]
const ENV_KEYS: [&str; 4] = [
    "RICROB_LOG_LEVEL",
    "RICROB_LOG_FORMAT",
    "RICROB_BIND",
    "RICROB_LAYOUT",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Board configuration
    #[serde(default)]
    pub board: BoardConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable request tracing
    pub enable_request_logging: bool,
}

/// Board configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Symbol layout file; without one the board has no symbol cells
    pub layout_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            enable_request_logging: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut vars = HashMap::new();
        for key in ENV_KEYS {
            match std::env::var(key) {
                Ok(value) => {
                    vars.insert(key.to_string(), value);
                }
                Err(VarError::NotPresent) => {}
                Err(err) => return Err(err).with_context(|| format!("Invalid {key}")),
            }
        }
        Self::from_vars(vars)
    }

    /// Load configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();

        let level = vars
            .get("RICROB_LOG_LEVEL")
            .cloned()
            .unwrap_or(defaults.logging.level);

        let format = vars
            .get("RICROB_LOG_FORMAT")
            .cloned()
            .unwrap_or(defaults.logging.format);

        let bind_address = match vars.get("RICROB_BIND") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid RICROB_BIND address: {addr}"))?,
            None => defaults.server.bind_address,
        };

        let layout_path = vars.get("RICROB_LAYOUT").map(PathBuf::from);

        let config = Self {
            logging: LoggingConfig { level, format },
            server: ServerConfig {
                bind_address,
                enable_request_logging: defaults.server.enable_request_logging,
            },
            board: BoardConfig { layout_path },
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !["trace", "debug", "info", "warn", "error"].contains(&self.logging.level.as_str()) {
            anyhow::bail!("unknown log level: {}", self.logging.level);
        }

        if !["text", "json"].contains(&self.logging.format.as_str()) {
            anyhow::bail!("unknown log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Load the configured board layout, or the empty default
    pub fn load_layout(&self) -> Result<Layout> {
        match &self.board.layout_path {
            Some(path) => Ok(Layout::from_file(path)?),
            None => Ok(Layout::default()),
        }
    }
}
