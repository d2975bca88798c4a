//! Lifecycle scheduler
//!
//! Periodically offers every claim to [`WorkflowEngine::auto_advance`]. Ticks
//! run inline on one task, so a tick never starts before the previous one has
//! finished; ticks missed while busy are skipped rather than queued.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use core_kernel::ClaimId;
use crate::engine::WorkflowEngine;
use crate::error::ClaimError;

/// Scheduler settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Time between evaluation ticks
    pub interval: Duration,
    /// Chance per tick that an UNDER_REVIEW claim advances
    pub advance_probability: f64,
}

impl SchedulerConfig {
    /// Rejects a zero interval, which tokio cannot tick on
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.interval.is_zero() {
            return Err(ClaimError::Validation("scheduler interval must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            advance_probability: 0.2,
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub evaluated: usize,
    pub advanced: Vec<ClaimId>,
    /// True when another tick was still running and this one did nothing
    pub skipped: bool,
}

#[derive(Debug)]
pub struct LifecycleScheduler {
    engine: Arc<WorkflowEngine>,
    config: SchedulerConfig,
    /// Doubles as the tick guard: a tick holds it for its whole run
    rng: Mutex<StdRng>,
}

impl LifecycleScheduler {
    pub fn new(engine: Arc<WorkflowEngine>, config: SchedulerConfig) -> Result<Self, ClaimError> {
        Self::with_rng(engine, config, StdRng::from_entropy())
    }

    /// Uses a caller-supplied generator, e.g. a seeded one in tests
    ///
    /// # Errors
    ///
    /// `Validation` when `config` has a zero interval
    pub fn with_rng(engine: Arc<WorkflowEngine>, config: SchedulerConfig, rng: StdRng) -> Result<Self, ClaimError> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            rng: Mutex::new(rng),
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Evaluates every claim once
    pub fn run_tick(&self) -> TickReport {
        let Some(mut rng) = self.rng.try_lock() else {
            debug!("Previous tick still running, skipping");
            return TickReport { skipped: true, ..TickReport::default() };
        };

        let ids = self.engine.store().ids();
        let mut report = TickReport { evaluated: ids.len(), ..TickReport::default() };
        for id in ids {
            match self.engine.auto_advance(id, self.config.advance_probability, &mut *rng) {
                Ok(Some(_)) => report.advanced.push(id),
                Ok(None) => {}
                Err(err) => warn!(claim_id = %id, error = %err, "Automatic advance failed"),
            }
        }
        debug!(evaluated = report.evaluated, advanced = report.advanced.len(), "Lifecycle tick complete");
        report
    }

    /// Starts ticking on the current tokio runtime
    ///
    /// The first evaluation happens one interval after the call.
    pub fn spawn(self: Arc<Self>) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let interval = self.config.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;

            info!(interval_ms = interval.as_millis() as u64, "Lifecycle scheduler started");
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        self.run_tick();
                    }
                }
            }
            info!("Lifecycle scheduler stopped");
        });

        SchedulerHandle { shutdown: shutdown_tx, task }
    }
}

/// Handle to a running scheduler
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops the scheduler and waits for the current tick to finish
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        // Err only means the task already exited.
        let _ = self.shutdown.send(true);
        self.task.await
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
