pub mod convergence;
pub mod health;
pub mod machines;
pub mod simulations;

use axum::Router;

use crate::state::AppState;

/// Build the service route tree.
///
/// ```text
/// /simulations              list (GET)
/// /simulations/{id}         detail (GET)
/// /simulation               create (POST)
/// /machines                 list (GET)
/// /converge/{id}            convergence series (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(simulations::router())
        .merge(machines::router())
        .merge(convergence::router())
}
