//! External integrations
//!
//! This module defines the connection capability the engine drives and the
//! in-memory adapter used for tests and dry runs. Real database adapters
//! live outside this crate: anything exposing [`Connection`] can be handed
//! to a job under a name of the caller's choosing.

pub mod connection;
pub mod memory;

pub use connection::{Connection, ConnectionMap, Rows};
pub use memory::MemoryConnection;
