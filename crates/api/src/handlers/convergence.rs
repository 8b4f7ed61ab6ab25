//! Handler for the convergence graph of a simulation.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use simflow_core::error::CoreError;
use simflow_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /converge/{id}
///
/// Returns `{ "data": [{ "seconds", "loss" }, ...] }` ascending by
/// seconds. An empty series is reported as 404: either the simulation
/// does not exist or its run has not produced a sample yet.
pub async fn get_convergence(
    State(state): State<AppState>,
    Path(simulation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let series = state.simulations.convergence_series(simulation_id).await?;
    if series.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Convergence data for simulation",
            id: simulation_id,
        }));
    }
    Ok(Json(DataResponse { data: series }))
}
