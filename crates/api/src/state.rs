use std::sync::Arc;

use simflow_db::DbPool;
use simflow_worker::TaskQueue;

use crate::config::ServerConfig;
use crate::service::SimulationService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Simulation CRUD and background-run dispatch.
    pub simulations: SimulationService,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig, tasks: TaskQueue) -> Self {
        Self {
            simulations: SimulationService::new(pool.clone(), tasks),
            pool,
            config: Arc::new(config),
        }
    }
}
