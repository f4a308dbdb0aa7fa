//! Logging and observability
//!
//! Two distinct concerns live here:
//!
//! - [`query_log`] - the query-event capability: the [`QueryLogger`] trait
//!   the engine emits structured SQL events through, and the default
//!   [`ConsoleLogger`]
//! - [`structured`] - ambient `tracing` diagnostics setup for host
//!   applications (console + optional rotating file)

pub mod query_log;
pub mod structured;

pub use query_log::{ConsoleLogger, QueryLogger};
pub use structured::{init_logging, LoggingGuard};
