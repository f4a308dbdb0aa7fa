//! Configuration management for Stagehand.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation for host applications embedding the engine. Settings cover
//! the ambient concerns (application identity, logging); stage and bound
//! callbacks are registered in code.
//!
//! # Example
//!
//! ```no_run
//! use stagehand::config::StagehandConfig;
//!
//! let config = StagehandConfig::from_file("stagehand.toml").expect("Failed to load config");
//! assert!(config.validate().is_ok());
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{ApplicationConfig, LoggingConfig, StagehandConfig};
