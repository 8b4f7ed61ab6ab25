use axum::routing::get;
use axum::Router;

use crate::handlers::machines;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/machines", get(machines::list_machines))
}
