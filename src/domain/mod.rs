//! Domain types for Stagehand.
//!
//! This module contains the core vocabulary of the engine: lifecycle stages,
//! iteration bounds, structured log events, and the error types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Lifecycle vocabulary** ([`Stage`], [`Bound`])
//! - **Structured log events** ([`LogEvent`], [`EventKind`], [`Emitter`])
//! - **Error types** ([`EtlError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```
//! use stagehand::domain::{EtlError, Result};
//!
//! fn example() -> Result<()> {
//!     let stage: stagehand::domain::Stage = "before_etl".parse()?;
//!     assert_eq!(stage.to_string(), "before_etl");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod events;
pub mod result;
pub mod stage;

// Re-export commonly used types for convenience
pub use errors::EtlError;
pub use events::{Emitter, EventKind, LogEvent};
pub use result::Result;
pub use stage::{Bound, Stage};
