//! Convergence samples recorded by the simulation runner.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One `(seconds, loss)` row of `convergence_data`.
#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ConvergencePoint {
    pub seconds: i32,
    pub loss: f64,
}

impl From<simflow_core::convergence::Sample> for ConvergencePoint {
    fn from(sample: simflow_core::convergence::Sample) -> Self {
        Self {
            seconds: sample.seconds,
            loss: sample.loss,
        }
    }
}
