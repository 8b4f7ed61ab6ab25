//! Handlers for the simulation resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use simflow_core::error::CoreError;
use simflow_core::types::DbId;
use simflow_db::models::simulation::{CreateSimulation, SimulationListQuery};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /simulations
///
/// List simulations. Supports optional `status` (exact match, must be a
/// known status) and `order_by` (`name`, `creation_date`, `update_date`;
/// anything else sorts by `creation_date`).
pub async fn list_simulations(
    State(state): State<AppState>,
    Query(params): Query<SimulationListQuery>,
) -> AppResult<impl IntoResponse> {
    let simulations = state.simulations.list(&params).await?;
    Ok(Json(simulations))
}

/// GET /simulations/{id}
pub async fn get_simulation(
    State(state): State<AppState>,
    Path(simulation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let simulation = state
        .simulations
        .detail(simulation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Simulation",
            id: simulation_id,
        }))?;
    Ok(Json(simulation))
}

/// POST /simulation
///
/// Register a simulation (and its machine, if new) and start its
/// background run. Returns 201 with `{ id, status }`; the status is
/// `pending` or `running` depending on how far the run has got.
pub async fn create_simulation(
    State(state): State<AppState>,
    Json(input): Json<CreateSimulation>,
) -> AppResult<impl IntoResponse> {
    let created = state.simulations.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
