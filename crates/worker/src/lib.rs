//! Background execution of simulation runs.
//!
//! [`TaskQueue`] is the submit side handed to the HTTP layer; the
//! [`SimulationRunner`] drains the matching [`TaskReceiver`] and runs each
//! task as an independent tokio task. Submission is fire-and-forget:
//! callers observe progress by polling the simulation record and its
//! convergence data.

pub mod queue;
pub mod runner;

pub use queue::{task_queue, DispatchError, SimulationTask, TaskQueue, TaskReceiver};
pub use runner::{run_simulation, SimulationRunner};
