//! Domain error types
//!
//! This module defines the error hierarchy for Stagehand. All errors are
//! domain-specific and don't expose third-party types.

use crate::domain::stage::Bound;
use thiserror::Error;

/// Main Stagehand error type
///
/// This is the primary error type used throughout the engine. Failures from
/// collaborators (connections, loggers) surface through it unchanged in
/// meaning: the engine performs no retry or partial-success bookkeeping.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named connection is not present in the job's connection map
    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    /// An iteration bound accessor was invoked with no callback registered
    #[error("No callback registered for iteration bound `{0}`")]
    MissingBound(Bound),

    /// Failure reported by a connection capability
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failure executing or fetching a query
    #[error("Query error: {0}")]
    Query(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EtlError {
    fn from(err: serde_json::Error) -> Self {
        EtlError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EtlError {
    fn from(err: toml::de::Error) -> Self {
        EtlError::Configuration(format!("TOML parse error: {err}"))
    }
}
