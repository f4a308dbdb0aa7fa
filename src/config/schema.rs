//! Configuration schema types
//!
//! This module defines the settings structure for host applications
//! embedding the engine. Stage and bound callbacks are code and are
//! registered programmatically; the file-level settings cover the ambient
//! concerns: application identity and logging.

use serde::{Deserialize, Serialize};

/// Root configuration, mapping to the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagehandConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StagehandConfig {
    /// Loads and validates configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an
    /// environment variable placeholder is unset, or validation fails.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::domain::Result<Self> {
        super::loader::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in log lines
    pub name: String,

    /// Optional job description handed to [`EtlJob::set_description`](crate::core::EtlJob::set_description)
    #[serde(default)]
    pub description: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("application.name must not be empty".to_string());
        }
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(format!(
                "application.log_level '{other}' is invalid; must be one of: trace, debug, info, warn, error"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console output for ambient diagnostics
    #[serde(default = "default_true")]
    pub console_enabled: bool,

    /// Rotating JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// File rotation: daily, hourly, or never
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.local_rotation.as_str() {
            "daily" | "hourly" | "never" => {}
            other => {
                return Err(format!(
                    "logging.local_rotation '{other}' is invalid; must be one of: daily, hourly, never"
                ))
            }
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must not be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_enabled: default_true(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
