//! Lifecycle stages and iteration bounds
//!
//! The four lifecycle stages run in a fixed order; the three iteration
//! bounds parameterize the batched transform loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::EtlError;

/// One of the four ordered lifecycle stages of an ETL job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Create or verify the destination schema
    EnsureDestination,
    /// Pre-transform setup (staging tables, source snapshots)
    BeforeEtl,
    /// The transform itself; may run once or over batch windows
    Etl,
    /// Post-transform cleanup and publication
    AfterEtl,
}

impl Stage {
    /// The fixed execution order used by [`perform`](crate::core::EtlJob::perform)
    pub const ORDERED: [Stage; 4] = [
        Stage::EnsureDestination,
        Stage::BeforeEtl,
        Stage::Etl,
        Stage::AfterEtl,
    ];

    /// Stable slot index for callback storage
    pub(crate) const fn index(self) -> usize {
        match self {
            Stage::EnsureDestination => 0,
            Stage::BeforeEtl => 1,
            Stage::Etl => 2,
            Stage::AfterEtl => 3,
        }
    }

    /// The canonical snake_case name of this stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::EnsureDestination => "ensure_destination",
            Stage::BeforeEtl => "before_etl",
            Stage::Etl => "etl",
            Stage::AfterEtl => "after_etl",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ensure_destination" => Ok(Stage::EnsureDestination),
            "before_etl" => Ok(Stage::BeforeEtl),
            "etl" => Ok(Stage::Etl),
            "after_etl" => Ok(Stage::AfterEtl),
            other => Err(EtlError::Configuration(format!(
                "Unknown lifecycle stage: {other}. Must be one of: ensure_destination, before_etl, etl, after_etl"
            ))),
        }
    }
}

/// One of the three numeric bounds controlling the batched transform loop
///
/// Each bound is computed lazily by a caller-supplied callback and cached
/// for the lifetime of the job instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// First window start
    Start,
    /// Window width; each batch covers `[window_start, window_start + step)`
    Step,
    /// Inclusive loop limit checked against the next window start
    Stop,
}

impl Bound {
    /// All bounds, in the order they are consulted by the batching loop
    pub const ALL: [Bound; 3] = [Bound::Start, Bound::Step, Bound::Stop];

    /// Stable slot index for callback and cache storage
    pub(crate) const fn index(self) -> usize {
        match self {
            Bound::Start => 0,
            Bound::Step => 1,
            Bound::Stop => 2,
        }
    }

    /// The canonical snake_case name of this bound
    pub fn as_str(&self) -> &'static str {
        match self {
            Bound::Start => "start",
            Bound::Step => "step",
            Bound::Stop => "stop",
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bound {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Bound::Start),
            "step" => Ok(Bound::Step),
            "stop" => Ok(Bound::Stop),
            other => Err(EtlError::Configuration(format!(
                "Unknown iteration bound: {other}. Must be one of: start, step, stop"
            ))),
        }
    }
}
