// Stagehand - SQL ETL Lifecycle Orchestration
// Copyright (c) 2026 Stagehand Contributors
// Licensed under the MIT License

//! # Stagehand - SQL ETL Lifecycle Orchestration
//!
//! Stagehand runs extract-transform-load jobs as a fixed sequence of
//! lifecycle stages against a set of named data connections. A caller
//! registers one callback per stage, then drives the job with
//! [`perform`](core::EtlJob::perform); every SQL operation issued through
//! the job is timed and logged as structured events.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Ordered stages** - `ensure_destination`, `before_etl`, `etl`,
//!   `after_etl`, executed in that order with optional per-run exclusions
//! - **Batched iteration** - run the transform over successive numeric
//!   windows computed by lazily-memoized `start`/`step`/`stop` callbacks
//! - **Instrumentation** - `query_start`/`query_complete` events with
//!   elapsed runtimes for every `run`/`fetch`
//!
//! ## Architecture
//!
//! - [`core`] - The [`EtlJob`](core::EtlJob) engine: stage runner, callback
//!   registry, iteration controller, instrumentation
//! - [`adapters`] - The [`Connection`](adapters::Connection) capability and
//!   the in-memory test adapter
//! - [`domain`] - Stages, bounds, log events, and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Query logging and ambient diagnostics
//!
//! ## Quick Start
//!
//! ```
//! use stagehand::adapters::{Connection, MemoryConnection};
//! use stagehand::core::EtlJob;
//! use stagehand::domain::{Bound, Stage};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # fn main() -> stagehand::domain::Result<()> {
//! let mut connections = HashMap::new();
//! connections.insert(
//!     "warehouse".to_string(),
//!     Arc::new(MemoryConnection::new()) as Arc<dyn Connection>,
//! );
//!
//! let mut job = EtlJob::new(connections).config(|job| {
//!     job.set_description("daily order totals");
//!     job.register(Stage::EnsureDestination, |job, _| {
//!         job.run("warehouse", "CREATE TABLE IF NOT EXISTS order_totals (id INT, total INT)")?;
//!         Ok(())
//!     });
//!     // Batch the transform over id windows of 1000
//!     job.register_bound(Bound::Start, |_, _| Ok(0));
//!     job.register_bound(Bound::Step, |_, _| Ok(1000));
//!     job.register_bound(Bound::Stop, |_, _| Ok(10_000));
//!     job.register(Stage::Etl, |job, window| {
//!         job.run(
//!             "warehouse",
//!             &format!(
//!                 "INSERT INTO order_totals SELECT id, SUM(amount) FROM orders \
//!                  WHERE id >= {} AND id < {} GROUP BY id",
//!                 window[0], window[1]
//!             ),
//!         )?;
//!         Ok(())
//!     });
//! });
//!
//! job.perform(&[])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Iteration Mode
//!
//! Iteration mode is active exactly when all three bounds have callbacks.
//! Bounds are computed once and cached for the life of the job, each batch
//! covers the half-open window `[window_start, window_start + step)`, and
//! the loop runs while `stop >= window_start` - so the final window may
//! extend past `stop`. Clamping is up to the SQL that consumes the window,
//! and bound sanity (a positive step) is the caller's responsibility.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, EtlError>`](domain::Result).
//! Failures from connections and callbacks propagate unchanged: a failing
//! stage aborts [`perform`](core::EtlJob::perform) and a failing batch
//! aborts the remaining windows.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
