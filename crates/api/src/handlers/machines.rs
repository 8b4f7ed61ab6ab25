use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /machines
pub async fn list_machines(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let machines = state.simulations.list_machines().await?;
    Ok(Json(machines))
}
