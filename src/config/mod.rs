//! Configuration management for vitalsgen
//!
//! Configuration is built once at startup and passed explicitly to every
//! component that needs it. Sources, highest precedence first:
//! 1. Command-line arguments
//! 2. Configuration file (TOML)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Largest sequence number that still renders as a three-digit id
pub const MAX_RECORD_COUNT: u32 = 999;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output layout configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Record generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// External store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where exported files and the log file are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base output directory
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// File stem shared by the TXT, CSV and JSON exports
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Log file name inside the base directory
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// Record generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of records to generate, numbered from 1
    #[serde(default = "default_count")]
    pub count: u32,

    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

/// External document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Whether to send valid records to the store.
    /// `None` means the user is asked before the pipeline runs.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// MongoDB connection string
    #[serde(default)]
    pub uri: Option<String>,

    /// Server selection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Log file level
    #[serde(default = "default_file_level")]
    pub file_level: LogLevel,

    /// Enable timestamps in console logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_base_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_file_stem() -> String {
    "registros".to_string()
}

fn default_log_file() -> String {
    "log.txt".to_string()
}

fn default_count() -> u32 {
    20
}

fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_file_level() -> LogLevel {
    LogLevel::Info
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            file_stem: default_file_stem(),
            log_file: default_log_file(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            seed: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            uri: None,
            timeout: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_level: default_file_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// An explicit path that does not exist is an error. When no path is
    /// given, the default path is tried and defaults are used if it is
    /// absent.
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vitalsgen")
            .join("config.toml")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.generation.count == 0 || self.generation.count > MAX_RECORD_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "generation.count".to_string(),
                value: self.generation.count.to_string(),
            }
            .into());
        }

        if self.output.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "output.base_dir".to_string(),
                value: String::new(),
            }
            .into());
        }

        for (field, value) in [
            ("output.file_stem", &self.output.file_stem),
            ("output.log_file", &self.output.log_file),
        ] {
            if value.trim().is_empty() || value.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }

        if self.store.timeout == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if let Some(uri) = &self.store.uri {
            if uri.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "store.uri".to_string(),
                    value: uri.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl StoreConfig {
    /// Server selection timeout as a Duration
    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// True once the user (or config) has opted into the store
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(true)
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
