//! In-memory connection adapter
//!
//! A scripted [`Connection`] that records every statement it receives and
//! replies with pre-registered rows. It stands in for live databases in
//! tests and dry runs, the same role an in-memory store plays for a real
//! deployment.

use crate::adapters::connection::{Connection, Rows};
use crate::domain::{EtlError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct MemoryState {
    executed: Vec<String>,
    scripted_rows: HashMap<String, Rows>,
    scripted_affected: HashMap<String, u64>,
    fail_matching: Option<String>,
}

/// Scripted in-memory connection
///
/// # Examples
///
/// ```
/// use stagehand::adapters::{Connection, MemoryConnection};
/// use serde_json::json;
///
/// let conn = MemoryConnection::new();
/// conn.script_rows("SELECT MAX(id) FROM events", vec![json!({"max": 90})]);
///
/// let rows = conn.fetch("SELECT MAX(id) FROM events").unwrap();
/// assert_eq!(rows[0]["max"], 90);
/// assert_eq!(conn.executed(), vec!["SELECT MAX(id) FROM events"]);
/// ```
#[derive(Default)]
pub struct MemoryConnection {
    state: Mutex<MemoryState>,
}

impl MemoryConnection {
    /// Creates an empty connection: every fetch returns no rows, every run
    /// reports zero affected rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rows to return for an exact SQL text
    pub fn script_rows(&self, sql: impl Into<String>, rows: Rows) {
        self.state
            .lock()
            .expect("memory connection lock poisoned")
            .scripted_rows
            .insert(sql.into(), rows);
    }

    /// Registers the affected-row count to report for an exact SQL text
    pub fn script_affected(&self, sql: impl Into<String>, affected: u64) {
        self.state
            .lock()
            .expect("memory connection lock poisoned")
            .scripted_affected
            .insert(sql.into(), affected);
    }

    /// Makes any statement containing `fragment` fail with a connection error
    pub fn fail_on(&self, fragment: impl Into<String>) {
        self.state
            .lock()
            .expect("memory connection lock poisoned")
            .fail_matching = Some(fragment.into());
    }

    /// All statements received so far, in execution order
    pub fn executed(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("memory connection lock poisoned")
            .executed
            .clone()
    }

    fn record(&self, sql: &str) -> Result<()> {
        let mut state = self.state.lock().expect("memory connection lock poisoned");
        state.executed.push(sql.to_string());
        if let Some(fragment) = &state.fail_matching {
            if sql.contains(fragment.as_str()) {
                return Err(EtlError::Connection(format!(
                    "scripted failure for statement: {sql}"
                )));
            }
        }
        Ok(())
    }
}

impl Connection for MemoryConnection {
    fn run(&self, sql: &str) -> Result<u64> {
        self.record(sql)?;
        let state = self.state.lock().expect("memory connection lock poisoned");
        Ok(state.scripted_affected.get(sql).copied().unwrap_or(0))
    }

    fn fetch(&self, sql: &str) -> Result<Rows> {
        self.record(sql)?;
        let state = self.state.lock().expect("memory connection lock poisoned");
        Ok(state.scripted_rows.get(sql).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_returns_scripted_rows() {
        let conn = MemoryConnection::new();
        conn.script_rows("SELECT 1", vec![json!({"one": 1})]);

        let rows = conn.fetch("SELECT 1").unwrap();
        assert_eq!(rows, vec![json!({"one": 1})]);
    }

    #[test]
    fn test_fetch_unscripted_is_empty() {
        let conn = MemoryConnection::new();
        assert!(conn.fetch("SELECT 2").unwrap().is_empty());
    }

    #[test]
    fn test_run_reports_scripted_affected() {
        let conn = MemoryConnection::new();
        conn.script_affected("DELETE FROM stale", 7);

        assert_eq!(conn.run("DELETE FROM stale").unwrap(), 7);
        assert_eq!(conn.run("DELETE FROM fresh").unwrap(), 0);
    }

    #[test]
    fn test_statements_recorded_in_order() {
        let conn = MemoryConnection::new();
        conn.run("CREATE TABLE t (id INT)").unwrap();
        conn.fetch("SELECT * FROM t").unwrap();

        assert_eq!(
            conn.executed(),
            vec!["CREATE TABLE t (id INT)", "SELECT * FROM t"]
        );
    }

    #[test]
    fn test_fail_on_matching_statement() {
        let conn = MemoryConnection::new();
        conn.fail_on("broken_table");

        let err = conn.fetch("SELECT * FROM broken_table").unwrap_err();
        assert!(matches!(err, EtlError::Connection(_)));
        // The failing statement is still recorded
        assert_eq!(conn.executed().len(), 1);
    }
}
