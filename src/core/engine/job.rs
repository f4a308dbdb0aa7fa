//! The ETL job engine
//!
//! `EtlJob` owns the stage callbacks, the iteration plan, the connection
//! map, and the query logger, and drives a job through its four lifecycle
//! stages. Execution is single-threaded and fully synchronous: every stage,
//! callback, and SQL call runs to completion before the next begins.

use crate::adapters::connection::{Connection, ConnectionMap, Rows};
use crate::core::engine::iteration::IterationPlan;
use crate::core::engine::slots::StageSlots;
use crate::domain::{Bound, Emitter, EtlError, LogEvent, Result, Stage};
use crate::logging::{ConsoleLogger, QueryLogger};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Lifecycle orchestration engine for one ETL job
///
/// A job is created once with its connections, configured with stage and
/// bound callbacks, then driven by [`perform`](Self::perform). It has no
/// teardown; discard it when the job completes.
///
/// # Examples
///
/// ```
/// use stagehand::adapters::MemoryConnection;
/// use stagehand::core::EtlJob;
/// use stagehand::domain::Stage;
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// # fn main() -> stagehand::domain::Result<()> {
/// let mut connections = HashMap::new();
/// connections.insert(
///     "destination".to_string(),
///     Arc::new(MemoryConnection::new()) as Arc<dyn stagehand::adapters::Connection>,
/// );
///
/// let mut job = EtlJob::with_logger(connections, None).config(|job| {
///     job.register(Stage::EnsureDestination, |job, _args| {
///         job.run("destination", "CREATE TABLE IF NOT EXISTS totals (day DATE, n INT)")?;
///         Ok(())
///     });
///     job.register(Stage::Etl, |job, _args| {
///         job.run("destination", "INSERT INTO totals SELECT day, COUNT(*) FROM events GROUP BY day")?;
///         Ok(())
///     });
/// });
///
/// job.perform(&[])?;
/// # Ok(())
/// # }
/// ```
pub struct EtlJob {
    id: Uuid,
    description: Option<String>,
    connections: ConnectionMap,
    logger: Option<Arc<dyn QueryLogger>>,
    stages: StageSlots,
    iteration: IterationPlan,
}

impl EtlJob {
    /// Creates a job with the default console query logger
    pub fn new(connections: ConnectionMap) -> Self {
        Self::with_logger(connections, Some(Arc::new(ConsoleLogger::new())))
    }

    /// Creates a job with an explicit logger, or none to disable query
    /// logging entirely
    pub fn with_logger(
        connections: ConnectionMap,
        logger: Option<Arc<dyn QueryLogger>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
            connections,
            logger,
            stages: StageSlots::new(),
            iteration: IterationPlan::new(),
        }
    }

    /// Fluent configuration entry point
    ///
    /// Hands the job to `configure` for callback registration and returns
    /// it, so construction and setup read as one expression.
    pub fn config(mut self, configure: impl FnOnce(&mut Self)) -> Self {
        configure(&mut self);
        self
    }

    /// Per-instance job identity, printed by the default logger
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable job label used in log lines
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the job description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Replaces (or removes) the query logger
    pub fn set_logger(&mut self, logger: Option<Arc<dyn QueryLogger>>) {
        self.logger = logger;
    }

    // ---- callback registry -------------------------------------------------

    /// Registers a callback for a lifecycle stage, replacing any prior one
    ///
    /// Callbacks receive the job and the invocation arguments; in iteration
    /// mode the transform callback's arguments are the window endpoints
    /// `[window_start, window_end]`.
    pub fn register(
        &mut self,
        stage: Stage,
        callback: impl FnMut(&mut EtlJob, &[i64]) -> Result<()> + 'static,
    ) {
        self.stages.set(stage, Box::new(callback));
    }

    /// Invokes the callback registered for `stage`
    ///
    /// A stage with no registered callback is a silent no-op. The `etl`
    /// stage routes through [`etl`](Self::etl) so iteration mode is honored
    /// no matter how the stage is reached.
    ///
    /// # Errors
    ///
    /// Propagates whatever the callback returns.
    pub fn invoke(&mut self, stage: Stage, args: &[i64]) -> Result<()> {
        match stage {
            Stage::Etl => self.etl(args),
            _ => self.invoke_slot(stage, args),
        }
    }

    /// True if a callback is registered for `stage`
    pub fn is_registered(&self, stage: Stage) -> bool {
        self.stages.is_registered(stage)
    }

    // The slot is vacated while its callback runs so the callback can borrow
    // the job mutably; a callback that re-registers its own stage wins over
    // the restore.
    fn invoke_slot(&mut self, stage: Stage, args: &[i64]) -> Result<()> {
        let Some(mut callback) = self.stages.take(stage) else {
            return Ok(());
        };
        let outcome = callback(self, args);
        self.stages.restore(stage, callback);
        outcome
    }

    // ---- iteration controller ----------------------------------------------

    /// Registers a callback computing an iteration bound, replacing any
    /// prior one
    pub fn register_bound(
        &mut self,
        bound: Bound,
        callback: impl FnMut(&mut EtlJob, &[i64]) -> Result<i64> + 'static,
    ) {
        self.iteration.set(bound, Box::new(callback));
    }

    /// Returns the value of an iteration bound
    ///
    /// The first successful invocation computes the value through the
    /// registered callback and memoizes it; every later access returns the
    /// cached value regardless of `args`. Passing arguments is deprecated
    /// and emits a non-fatal warning.
    ///
    /// # Errors
    ///
    /// [`EtlError::MissingBound`] when no callback is registered for
    /// `bound`, or whatever the callback itself returns. A failed
    /// computation is not memoized.
    pub fn bound(&mut self, bound: Bound, args: &[i64]) -> Result<i64> {
        if !args.is_empty() {
            tracing::warn!(
                bound = %bound,
                "passing arguments to a bound accessor is deprecated and will be removed; \
                 the memoized value is returned regardless"
            );
        }
        if let Some(value) = self.iteration.cached(bound) {
            return Ok(value);
        }
        let Some(mut callback) = self.iteration.take(bound) else {
            return Err(EtlError::MissingBound(bound));
        };
        let outcome = callback(self, args);
        self.iteration.restore(bound, callback);
        let value = outcome?;
        self.iteration.cache(bound, value);
        Ok(value)
    }

    /// True iff callbacks are registered for all of start, step, and stop
    ///
    /// When true, [`etl`](Self::etl) runs the batching loop instead of a
    /// single transform call.
    pub fn is_iterating(&self) -> bool {
        self.iteration.is_iterating()
    }

    // ---- lifecycle runner --------------------------------------------------

    /// Runs the lifecycle stages in their fixed order, skipping `except`
    ///
    /// The exclusion set is evaluated once, at call time. If a stage
    /// callback fails, the error propagates immediately and later stages do
    /// not run.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure.
    pub fn perform(&mut self, except: &[Stage]) -> Result<()> {
        for stage in Stage::ORDERED {
            if except.contains(&stage) {
                tracing::debug!(stage = %stage, "stage excluded from this run");
                continue;
            }
            tracing::debug!(stage = %stage, "invoking lifecycle stage");
            self.invoke(stage, &[])?;
        }
        Ok(())
    }

    /// Invokes the transform stage
    ///
    /// Outside iteration mode this is a plain invoke: the registered
    /// transform callback, if any, is called once with `args`.
    ///
    /// In iteration mode `args` is ignored and the transform runs over
    /// successive windows: starting at `start`, each batch covers the
    /// half-open range `[window_start, window_start + step)` and the loop
    /// continues while `stop >= window_start`. Because the stop comparison
    /// is inclusive and checked before advancing, the final window end may
    /// exceed `stop` when `stop - start` is not an exact multiple of
    /// `step`; downstream SQL that must not read past `stop` has to clamp
    /// the window itself. Bounds are memoized on first use, so the loop
    /// parameters are fixed for the whole run.
    ///
    /// Bound sanity is the caller's responsibility: a `step` of zero or
    /// less with `stop >= start` never terminates.
    ///
    /// # Errors
    ///
    /// Propagates the first transform or bound failure, aborting any
    /// remaining batches.
    pub fn etl(&mut self, args: &[i64]) -> Result<()> {
        if !self.is_iterating() {
            return self.invoke_slot(Stage::Etl, args);
        }
        if !self.stages.is_registered(Stage::Etl) {
            return Ok(());
        }

        let mut windows = 0u64;
        let mut current = self.bound(Bound::Start, &[])?;
        while self.bound(Bound::Stop, &[])? >= current {
            let window_start = current;
            current += self.bound(Bound::Step, &[])?;
            self.invoke_slot(Stage::Etl, &[window_start, current])?;
            windows += 1;
        }
        tracing::debug!(windows, "batched transform complete");
        Ok(())
    }

    // ---- instrumentation ---------------------------------------------------

    /// Executes a statement on the named connection, timed and logged
    ///
    /// # Errors
    ///
    /// [`EtlError::UnknownConnection`] for an unmapped name; otherwise
    /// whatever the connection reports, in which case no `query_complete`
    /// event is emitted.
    pub fn run(&self, connection_name: &str, sql: &str) -> Result<u64> {
        let connection = Arc::clone(self.connection(connection_name)?);
        self.time_and_log(sql, || connection.run(sql))
    }

    /// Fetches rows from the named connection, timed and logged
    ///
    /// # Errors
    ///
    /// Same contract as [`run`](Self::run).
    pub fn fetch(&self, connection_name: &str, sql: &str) -> Result<Rows> {
        let connection = Arc::clone(self.connection(connection_name)?);
        self.time_and_log(sql, || connection.fetch(sql))
    }

    /// Emits a debug-level event to the query logger, if one is configured
    ///
    /// The job attaches itself as the event's emitter before dispatch.
    pub fn debug(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            logger.debug(&event.with_emitter(self.emitter()));
        }
    }

    /// Emits an info-level event to the query logger, if one is configured
    pub fn info(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            logger.info(&event.with_emitter(self.emitter()));
        }
    }

    fn emitter(&self) -> Emitter {
        Emitter {
            description: self.description.clone(),
            job_id: self.id,
        }
    }

    fn connection(&self, name: &str) -> Result<&Arc<dyn Connection>> {
        self.connections
            .get(name)
            .ok_or_else(|| EtlError::UnknownConnection(name.to_string()))
    }

    // Success events wrap the call; a failure propagates immediately and
    // skips the query_complete event.
    fn time_and_log<T>(&self, sql: &str, operation: impl FnOnce() -> Result<T>) -> Result<T> {
        self.debug(LogEvent::query_start(sql));
        let started = Instant::now();
        let retval = operation()?;
        self.info(LogEvent::query_complete(sql, started.elapsed().as_secs_f64()));
        Ok(retval)
    }
}
