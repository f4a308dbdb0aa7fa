//! Query logger capability and default console logger
//!
//! The engine emits structured [`LogEvent`]s for every SQL operation. Any
//! type implementing [`QueryLogger`] can receive them; when a job is built
//! without an explicit logger the [`ConsoleLogger`] below is installed.

use crate::domain::{EventKind, LogEvent};
use chrono::Local;

/// Capability trait for receiving structured query events
///
/// Implementations decide transport and formatting. Absence of a logger on
/// a job disables event emission entirely; it never changes whether the
/// underlying SQL runs.
pub trait QueryLogger: Send + Sync {
    /// Receives a debug-level event (`query_start`)
    fn debug(&self, event: &LogEvent);

    /// Receives an info-level event (`query_complete`, messages)
    fn info(&self, event: &LogEvent);
}

/// Default query logger writing formatted lines to stdout
///
/// Line format:
///
/// ```text
/// [<timestamp>] SEVERITY event_type for "description" (job <id>)
/// ```
///
/// followed by event-specific detail: the SQL text for `query_start`, the
/// elapsed runtime for `query_complete`, or the message text otherwise.
/// The description falls back to `no description given` when the emitting
/// job has none.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    /// Creates the default console logger
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, severity: &str, event: &LogEvent) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f %z");
        println!("{}", render_line(&timestamp.to_string(), severity, event));
    }
}

impl QueryLogger for ConsoleLogger {
    fn debug(&self, event: &LogEvent) {
        self.emit("DEBUG", event);
    }

    fn info(&self, event: &LogEvent) {
        self.emit("INFO", event);
    }
}

/// Renders one formatted log line for `event`
pub(crate) fn render_line(timestamp: &str, severity: &str, event: &LogEvent) -> String {
    let description = event
        .emitter
        .as_ref()
        .and_then(|emitter| emitter.description.as_deref())
        .unwrap_or("no description given");
    let job_id = event
        .emitter
        .as_ref()
        .map(|emitter| emitter.job_id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let leadin = format!(
        "[{timestamp}] {severity} {} for \"{description}\" (job {job_id})",
        event.kind
    );

    match event.kind {
        EventKind::QueryStart => {
            format!("{leadin}\n{}", event.sql.as_deref().unwrap_or(""))
        }
        EventKind::QueryComplete => {
            format!("{leadin} runtime: {}s", event.runtime_secs.unwrap_or(0.0))
        }
        EventKind::Message => {
            format!("{leadin}: {}", event.message.as_deref().unwrap_or(""))
        }
    }
}
