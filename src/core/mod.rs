//! Core business logic for Stagehand.
//!
//! This module contains the lifecycle orchestration engine: the ordered
//! stage runner, the callback registry, the iteration controller, and the
//! SQL instrumentation wrapper.
//!
//! # Modules
//!
//! - [`engine`] - The [`EtlJob`] engine and its callback machinery

pub mod engine;

pub use engine::{BoundCallback, EtlJob, StageCallback};
