//! In-process work queue for simulation runs.
//!
//! Backed by an unbounded `tokio::sync::mpsc` channel. A dispatch succeeds
//! as soon as the task is in the channel; nothing waits for the run.

use simflow_core::types::DbId;
use tokio::sync::mpsc;

/// A request to run one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationTask {
    pub simulation_id: DbId,
}

/// The runner side of the queue has been dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("task queue is closed; simulation {simulation_id} was not dispatched")]
pub struct DispatchError {
    pub simulation_id: DbId,
}

/// Submit half of the queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    sender: mpsc::UnboundedSender<SimulationTask>,
}

/// Receive half of the queue, owned by the runner.
#[derive(Debug)]
pub struct TaskReceiver {
    receiver: mpsc::UnboundedReceiver<SimulationTask>,
}

/// Create a connected queue / receiver pair.
pub fn task_queue() -> (TaskQueue, TaskReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (TaskQueue { sender }, TaskReceiver { receiver })
}

impl TaskQueue {
    /// Enqueue a run for `simulation_id`.
    pub fn dispatch(&self, simulation_id: DbId) -> Result<(), DispatchError> {
        self.sender
            .send(SimulationTask { simulation_id })
            .map_err(|_| DispatchError { simulation_id })?;
        tracing::debug!(simulation_id, "Simulation task enqueued");
        Ok(())
    }
}

impl TaskReceiver {
    /// Wait for the next task. `None` once every [`TaskQueue`] is dropped
    /// and the channel is drained.
    pub async fn recv(&mut self) -> Option<SimulationTask> {
        self.receiver.recv().await
    }

    /// Take a task if one is already waiting. Used by the runner to drain
    /// the queue on shutdown.
    pub fn try_recv(&mut self) -> Option<SimulationTask> {
        self.receiver.try_recv().ok()
    }
}
