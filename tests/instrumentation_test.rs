//! Integration tests for SQL instrumentation and query logging

use serde_json::json;
use stagehand::adapters::{Connection, MemoryConnection};
use stagehand::core::EtlJob;
use stagehand::domain::{EventKind, LogEvent};
use stagehand::logging::QueryLogger;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Captures every event the engine emits, tagged with its severity
#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<(&'static str, LogEvent)>>,
}

impl RecordingLogger {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn events(&self) -> Vec<(&'static str, LogEvent)> {
        self.events.lock().unwrap().clone()
    }
}

impl QueryLogger for RecordingLogger {
    fn debug(&self, event: &LogEvent) {
        self.events.lock().unwrap().push(("debug", event.clone()));
    }

    fn info(&self, event: &LogEvent) {
        self.events.lock().unwrap().push(("info", event.clone()));
    }
}

fn harness() -> (EtlJob, Arc<MemoryConnection>, Arc<RecordingLogger>) {
    let connection = Arc::new(MemoryConnection::new());
    let logger = RecordingLogger::new();
    let mut connections: HashMap<String, Arc<dyn Connection>> = HashMap::new();
    connections.insert("source".to_string(), Arc::clone(&connection) as _);
    let job = EtlJob::with_logger(connections, Some(Arc::clone(&logger) as _));
    (job, connection, logger)
}

#[test]
fn run_emits_start_and_complete_events() {
    let (job, connection, logger) = harness();
    connection.script_affected("DELETE FROM stale", 3);

    let affected = job.run("source", "DELETE FROM stale").unwrap();
    assert_eq!(affected, 3);

    let events = logger.events();
    assert_eq!(events.len(), 2);

    let (severity, start) = &events[0];
    assert_eq!(*severity, "debug");
    assert_eq!(start.kind, EventKind::QueryStart);
    assert_eq!(start.sql.as_deref(), Some("DELETE FROM stale"));

    let (severity, complete) = &events[1];
    assert_eq!(*severity, "info");
    assert_eq!(complete.kind, EventKind::QueryComplete);
    assert_eq!(complete.sql.as_deref(), Some("DELETE FROM stale"));
    assert!(complete.runtime_secs.unwrap() >= 0.0);
}

#[test]
fn fetch_emits_the_same_event_pair() {
    let (job, connection, logger) = harness();
    connection.script_rows("SELECT 1", vec![json!({"one": 1})]);

    let rows = job.fetch("source", "SELECT 1").unwrap();
    assert_eq!(rows, vec![json!({"one": 1})]);

    let kinds: Vec<EventKind> = logger.events().iter().map(|(_, e)| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::QueryStart, EventKind::QueryComplete]);
}

#[test]
fn events_carry_the_emitting_job() {
    let (job, _connection, logger) = harness();
    let mut job = job;
    job.set_description("nightly revenue rollup");

    job.run("source", "SELECT 1").unwrap();

    for (_, event) in logger.events() {
        let emitter = event.emitter.expect("event should carry its emitter");
        assert_eq!(emitter.description.as_deref(), Some("nightly revenue rollup"));
        assert_eq!(emitter.job_id, job.id());
    }
}

#[test]
fn without_a_logger_sql_still_executes_silently() {
    let connection = Arc::new(MemoryConnection::new());
    connection.script_affected("UPDATE t SET n = 1", 5);
    let mut connections: HashMap<String, Arc<dyn Connection>> = HashMap::new();
    connections.insert("source".to_string(), Arc::clone(&connection) as _);
    let job = EtlJob::with_logger(connections, None);

    let affected = job.run("source", "UPDATE t SET n = 1").unwrap();

    assert_eq!(affected, 5);
    assert_eq!(connection.executed(), vec!["UPDATE t SET n = 1"]);
}

#[test]
fn connection_failure_skips_the_complete_event() {
    let (job, connection, logger) = harness();
    connection.fail_on("broken");

    let result = job.fetch("source", "SELECT * FROM broken");
    assert!(result.is_err());

    let events = logger.events();
    // query_start was emitted before the call; no query_complete followed
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].1.kind, EventKind::QueryStart);
    // The statement did reach the connection
    assert_eq!(connection.executed(), vec!["SELECT * FROM broken"]);
}

#[test]
fn unknown_connection_emits_no_events() {
    let (job, _connection, logger) = harness();

    assert!(job.run("warehouse", "SELECT 1").is_err());
    assert!(logger.events().is_empty());
}

#[test]
fn caller_events_flow_through_the_logger() {
    let (job, _connection, logger) = harness();

    job.info(LogEvent::message("transform finished"));
    job.debug(LogEvent::message("verbose detail"));

    let events = logger.events();
    assert_eq!(events[0].0, "info");
    assert_eq!(events[0].1.message.as_deref(), Some("transform finished"));
    assert_eq!(events[1].0, "debug");
}
