use axum::routing::get;
use axum::Router;

use crate::handlers::convergence;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/converge/{id}", get(convergence::get_convergence))
}
