//! Client configuration loaded from TOML.

use crate::driver::{ConnectParams, DriverOptions};
use crate::preferences::Theme;
use crate::protocol::Revision;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Client configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server host, with or without a scheme.
    #[serde(default = "default_host")]
    host: String,

    /// Server port.
    #[serde(default = "default_port")]
    port: u16,

    /// Server protocol revision.
    #[serde(default)]
    protocol: Revision,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Name of the local player (white).
    #[serde(default = "default_white")]
    white: String,

    /// Name of the opponent (black).
    #[serde(default = "default_black")]
    black: String,

    /// Board theme.
    #[serde(default)]
    theme: Theme,

    /// Where the terminal front end writes its log.
    #[serde(default = "default_log_file")]
    log_file: String,
}

#[instrument]
fn default_host() -> String {
    "localhost".to_string()
}

#[instrument]
fn default_port() -> u16 {
    3000
}

#[instrument]
fn default_timeout_secs() -> u64 {
    10
}

#[instrument]
fn default_white() -> String {
    "white".to_string()
}

#[instrument]
fn default_black() -> String {
    "black".to_string()
}

#[instrument]
fn default_log_file() -> String {
    "checkmate.log".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            protocol: Revision::default(),
            timeout_secs: default_timeout_secs(),
            white: default_white(),
            black: default_black(),
            theme: Theme::default(),
            log_file: default_log_file(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;
        let config = Self::parse(&content)?;
        info!(host = %config.host, port = config.port, revision = %config.protocol, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the server address.
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Replaces the protocol revision.
    pub fn with_protocol(mut self, protocol: Revision) -> Self {
        self.protocol = protocol;
        self
    }

    /// Replaces the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Connection parameters for the configured server.
    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams::new(self.host.clone(), self.port)
    }

    /// Driver options derived from this configuration.
    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions::new(
            self.protocol,
            Duration::from_secs(self.timeout_secs),
            self.white.clone(),
            self.black.clone(),
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
