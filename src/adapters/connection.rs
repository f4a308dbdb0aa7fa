//! Connection abstraction
//!
//! This module defines the trait that data connections must implement to be
//! driven by the engine. A connection is an opaque capability: the engine
//! never parses or validates the SQL it passes through, and it never opens,
//! pools, or closes the underlying resource.

use crate::domain::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Rows returned by a fetch, each an opaque JSON object
pub type Rows = Vec<serde_json::Value>;

/// Named connections available to a job, keyed by connection name
pub type ConnectionMap = HashMap<String, Arc<dyn Connection>>;

/// Capability trait for a named data connection
///
/// Errors from either operation propagate to the caller uninterpreted; the
/// engine aborts the current stage or batch iteration and performs no retry.
pub trait Connection: Send + Sync {
    /// Execute a statement, returning the number of affected rows
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying store reports.
    fn run(&self, sql: &str) -> Result<u64>;

    /// Execute a query, returning its rows
    ///
    /// # Errors
    ///
    /// Returns whatever error the underlying store reports.
    fn fetch(&self, sql: &str) -> Result<Rows>;
}
