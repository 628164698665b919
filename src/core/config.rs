//! Configuration management for the Scheme relay.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{RelayError, Result};
use crate::core::interpreter::ExecutionMode;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Path the command endpoint is mounted at
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Where interpreter calls run
    #[serde(default)]
    pub execution: ExecutionMode,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Interpreter configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InterpreterConfig {
    /// Scheme files evaluated into the store at startup, in order
    #[serde(default)]
    pub preload: Vec<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directives, used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_mount_path() -> String {
    "/scheme".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_log_filter() -> String {
    "scheme_relay=info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            mount_path: default_mount_path(),
            execution: ExecutionMode::default(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RelayError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. SCHEME_RELAY_CONFIG env var
    /// 2. XDG config file (~/.config/scheme-relay/config.toml)
    /// 3. Legacy ./scheme-relay.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("SCHEME_RELAY_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("scheme-relay.toml").exists() {
                Self::from_file("scheme-relay.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    ///
    /// Unparseable numeric values are ignored; an unknown execution mode
    /// or log format is an error.
    pub fn merge_env(&mut self) -> Result<()> {
        // Server configuration
        if let Ok(host) = env::var("SCHEME_RELAY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SCHEME_RELAY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Relay configuration
        if let Ok(mount_path) = env::var("SCHEME_RELAY_MOUNT_PATH") {
            self.relay.mount_path = mount_path;
        }
        if let Ok(execution) = env::var("SCHEME_RELAY_EXECUTION") {
            self.relay.execution = execution.parse()?;
        }
        if let Ok(max_body) = env::var("SCHEME_RELAY_MAX_BODY_BYTES") {
            if let Ok(bytes) = max_body.parse() {
                self.relay.max_body_bytes = bytes;
            }
        }

        // Logging configuration
        if let Ok(format) = env::var("SCHEME_RELAY_LOG_FORMAT") {
            self.logging.format = match format.as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                other => {
                    return Err(RelayError::ConfigError(format!(
                        "Unknown log format '{other}' (expected pretty or json)"
                    )))
                }
            };
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(RelayError::ConfigError(
                "Port must be non-zero".to_string(),
            ));
        }

        let mount_path = &self.relay.mount_path;
        if !mount_path.starts_with('/')
            || mount_path.len() < 2
            || mount_path.contains([':', '*', '{', '}'])
        {
            return Err(RelayError::ConfigError(format!(
                "Mount path must be a literal absolute path below '/': {:?}",
                self.relay.mount_path
            )));
        }

        if self.relay.mount_path == "/health" {
            return Err(RelayError::ConfigError(
                "Mount path '/health' is reserved for the health check".to_string(),
            ));
        }

        if self.relay.max_body_bytes == 0 {
            return Err(RelayError::ConfigError(
                "Max body bytes must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.bind_addr());
        tracing::info!("  Mount path: {}", self.relay.mount_path);
        tracing::info!("  Execution mode: {}", self.relay.execution);
        tracing::info!("  Max body size: {} bytes", self.relay.max_body_bytes);
        tracing::info!(
            "  Preload files: {} files",
            self.interpreter.preload.len()
        );
        tracing::info!("  Log format: {:?}", self.logging.format);
    }
}
