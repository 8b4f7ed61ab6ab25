//! Simulation runner.
//!
//! Receives [`SimulationTask`]s from the queue and executes each one on its
//! own tokio task. Runs never coordinate with each other: there is no
//! concurrency bound, no mutual exclusion and no cancellation of a run
//! once it has started.
//!
//! A run moves its simulation `pending -> running`, appends one
//! convergence sample per iteration, then marks it `finished`. If an
//! append fails the simulation is reverted to `pending`; samples written
//! before the failure are kept.

use std::time::Duration;

use simflow_core::convergence::{self, ITERATION_DELAY};
use simflow_core::types::DbId;
use simflow_db::models::status::SimulationStatus;
use simflow_db::repositories::{ConvergenceRepo, SimulationRepo};
use simflow_db::DbPool;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::queue::{SimulationTask, TaskReceiver};

/// Drains the task queue and spawns one run per task.
pub struct SimulationRunner {
    pool: DbPool,
    iteration_delay: Duration,
    tracker: TaskTracker,
}

impl SimulationRunner {
    /// Create a runner with the standard one-second pause between
    /// iterations.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            iteration_delay: ITERATION_DELAY,
            tracker: TaskTracker::new(),
        }
    }

    /// Override the pause after each iteration. Used by tests to run a
    /// full simulation without waiting.
    pub fn with_iteration_delay(mut self, delay: Duration) -> Self {
        self.iteration_delay = delay;
        self
    }

    /// Receive tasks until `cancel` fires or every queue handle is dropped.
    ///
    /// Runs already spawned keep going after this returns; use
    /// [`SimulationRunner::shutdown`] to wait for them.
    pub async fn run(&self, mut receiver: TaskReceiver, cancel: CancellationToken) {
        tracing::info!(
            iteration_delay_ms = self.iteration_delay.as_millis() as u64,
            "Simulation runner started",
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Simulation runner shutting down");
                    discard_pending(&mut receiver);
                    break;
                }
                task = receiver.recv() => match task {
                    Some(task) => self.spawn(task),
                    None => {
                        tracing::info!("Task queue closed, simulation runner stopping");
                        break;
                    }
                },
            }
        }
    }

    /// Number of runs currently executing.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Stop accepting new runs and wait up to `timeout` for in-flight runs.
    ///
    /// Returns `true` if every run finished within the timeout.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let in_flight = self.tracker.len();
        if in_flight > 0 {
            tracing::info!(in_flight, "Waiting for in-flight simulation runs");
        }
        tokio::time::timeout(timeout, self.tracker.wait()).await.is_ok()
    }

    fn spawn(&self, task: SimulationTask) {
        let pool = self.pool.clone();
        let delay = self.iteration_delay;
        self.tracker.spawn(async move {
            run_simulation(&pool, task.simulation_id, delay).await;
        });
    }
}

/// Execute one simulation run to completion and return the final status.
pub async fn run_simulation(
    pool: &DbPool,
    simulation_id: DbId,
    iteration_delay: Duration,
) -> SimulationStatus {
    set_status(pool, simulation_id, SimulationStatus::Running).await;

    match generate_convergence(pool, simulation_id, iteration_delay).await {
        Ok(()) => {
            set_status(pool, simulation_id, SimulationStatus::Finished).await;
            SimulationStatus::Finished
        }
        Err(e) => {
            tracing::error!(simulation_id, error = %e, "Simulation run failed");
            set_status(pool, simulation_id, SimulationStatus::Pending).await;
            SimulationStatus::Pending
        }
    }
}

async fn generate_convergence(
    pool: &DbPool,
    simulation_id: DbId,
    iteration_delay: Duration,
) -> Result<(), sqlx::Error> {
    for sample in convergence::schedule() {
        ConvergenceRepo::append(pool, simulation_id, sample.into()).await?;
        tracing::debug!(
            simulation_id,
            seconds = sample.seconds,
            loss = sample.loss,
            "Generated convergence sample",
        );
        tokio::time::sleep(iteration_delay).await;
    }
    Ok(())
}

/// Drop tasks that were queued but never started. Their simulations stay
/// `pending`.
fn discard_pending(receiver: &mut TaskReceiver) {
    while let Some(task) = receiver.try_recv() {
        tracing::warn!(
            simulation_id = task.simulation_id,
            "Discarding queued simulation run on shutdown",
        );
    }
}

/// Best-effort status write: failures are logged, never propagated.
async fn set_status(pool: &DbPool, simulation_id: DbId, status: SimulationStatus) {
    match SimulationRepo::update_status(pool, simulation_id, status).await {
        Ok(true) => {
            tracing::info!(simulation_id, %status, "Updated simulation status");
        }
        Ok(false) => {
            tracing::warn!(simulation_id, %status, "Simulation not found, status not updated");
        }
        Err(e) => {
            tracing::error!(
                simulation_id,
                %status,
                error = %e,
                "Failed to update simulation status",
            );
        }
    }
}
