//! Configuration management for bashcomp
//!
//! This module handles loading, parsing, and managing configuration:
//! - Configuration files (TOML format)
//! - Command-line argument overrides
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bash binary and completion-definitions configuration
    #[serde(default)]
    pub bash: BashConfig,

    /// Completion request configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bash-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BashConfig {
    /// Path to the bash binary; discovered from well-known locations when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Path to the bash-completion definitions file sourced before each request
    #[serde(default = "default_init_script")]
    pub init_script: String,
}

/// Completion request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Deadline for a single bash invocation, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Set `completion-ignore-case` in the completion environment
    #[serde(default = "default_ignore_case")]
    pub ignore_case: bool,
}

/// History configuration for the interactive shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_history_size")]
    pub max_size: usize,

    /// Persist history across sessions
    #[serde(default = "default_history_persist")]
    pub persist: bool,

    /// History file path
    #[serde(default = "default_history_path")]
    pub file_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Include timestamps in log output
    #[serde(default)]
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

/* ========================= serde default helpers ========================= */

fn default_init_script() -> String {
    "/usr/share/bash-completion/bash_completion".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_ignore_case() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

fn default_history_persist() -> bool {
    true
}

fn default_history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bashcomp")
        .join("history")
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

/* ========================= Default impls ========================= */

impl Default for BashConfig {
    fn default() -> Self {
        Self {
            path: None,
            init_script: default_init_script(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            ignore_case: default_ignore_case(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_history_size(),
            persist: default_history_persist(),
            file_path: default_history_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no config file exists.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded or default configuration
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bashcomp")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.completion.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "completion.timeout_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if self.bash.init_script.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bash.init_script".to_string(),
                value: String::new(),
            }
            .into());
        }

        Ok(())
    }

    /// Get the completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_millis(self.completion.timeout_ms)
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
