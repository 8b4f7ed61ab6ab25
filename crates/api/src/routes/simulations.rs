use axum::routing::{get, post};
use axum::Router;

use crate::handlers::simulations;
use crate::state::AppState;

/// ```text
/// GET    /simulations        -> list_simulations
/// GET    /simulations/{id}   -> get_simulation
/// POST   /simulation         -> create_simulation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/simulations", get(simulations::list_simulations))
        .route("/simulations/{id}", get(simulations::get_simulation))
        .route("/simulation", post(simulations::create_simulation))
}
