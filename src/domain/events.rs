//! Structured query-log events
//!
//! Every SQL operation routed through the engine emits a `query_start` and,
//! on success, a `query_complete` event to the configured query logger.
//! Caller callbacks can emit their own `message` events through
//! [`EtlJob::info`](crate::core::EtlJob::info) and
//! [`EtlJob::debug`](crate::core::EtlJob::debug).

use serde::Serialize;
use uuid::Uuid;

/// The kind of a structured log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Emitted at debug level immediately before a SQL call
    QueryStart,
    /// Emitted at info level after a SQL call returns successfully
    QueryComplete,
    /// A caller-supplied message with no SQL attached
    Message,
}

impl EventKind {
    /// The canonical snake_case name of this event kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::QueryStart => "query_start",
            EventKind::QueryComplete => "query_complete",
            EventKind::Message => "message",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the job instance that emitted an event
#[derive(Debug, Clone, Serialize)]
pub struct Emitter {
    /// Human-readable job description, if one was configured
    pub description: Option<String>,
    /// Per-instance job identity
    pub job_id: Uuid,
}

/// A structured event handed to the query logger
///
/// Only the fields relevant to the event kind are populated: `sql` for
/// query events, `runtime_secs` for `query_complete`, `message` for
/// caller-supplied events.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Event kind
    pub kind: EventKind,
    /// SQL text, for query events
    pub sql: Option<String>,
    /// Elapsed wall-clock seconds, for `query_complete`
    pub runtime_secs: Option<f64>,
    /// Free-form text, for `message` events
    pub message: Option<String>,
    /// The emitting job, attached by the engine before dispatch
    pub emitter: Option<Emitter>,
}

impl LogEvent {
    /// Creates a `query_start` event for the given SQL text
    pub fn query_start(sql: impl Into<String>) -> Self {
        Self {
            kind: EventKind::QueryStart,
            sql: Some(sql.into()),
            runtime_secs: None,
            message: None,
            emitter: None,
        }
    }

    /// Creates a `query_complete` event for the given SQL text and runtime
    pub fn query_complete(sql: impl Into<String>, runtime_secs: f64) -> Self {
        Self {
            kind: EventKind::QueryComplete,
            sql: Some(sql.into()),
            runtime_secs: Some(runtime_secs),
            message: None,
            emitter: None,
        }
    }

    /// Creates a free-form `message` event
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Message,
            sql: None,
            runtime_secs: None,
            message: Some(text.into()),
            emitter: None,
        }
    }

    /// Attaches the emitting job's identity
    pub fn with_emitter(mut self, emitter: Emitter) -> Self {
        self.emitter = Some(emitter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_start_event() {
        let event = LogEvent::query_start("SELECT 1");
        assert_eq!(event.kind, EventKind::QueryStart);
        assert_eq!(event.sql.as_deref(), Some("SELECT 1"));
        assert!(event.runtime_secs.is_none());
        assert!(event.emitter.is_none());
    }

    #[test]
    fn test_query_complete_event() {
        let event = LogEvent::query_complete("SELECT 1", 0.25);
        assert_eq!(event.kind, EventKind::QueryComplete);
        assert_eq!(event.runtime_secs, Some(0.25));
    }

    #[test]
    fn test_message_event() {
        let event = LogEvent::message("batch finished");
        assert_eq!(event.kind, EventKind::Message);
        assert_eq!(event.message.as_deref(), Some("batch finished"));
        assert!(event.sql.is_none());
    }

    #[test]
    fn test_with_emitter() {
        let emitter = Emitter {
            description: Some("nightly rollup".to_string()),
            job_id: Uuid::new_v4(),
        };
        let event = LogEvent::message("hello").with_emitter(emitter);
        assert_eq!(
            event.emitter.unwrap().description.as_deref(),
            Some("nightly rollup")
        );
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::QueryStart.to_string(), "query_start");
        assert_eq!(EventKind::QueryComplete.to_string(), "query_complete");
        assert_eq!(EventKind::Message.to_string(), "message");
    }
}
