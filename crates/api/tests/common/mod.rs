#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use simflow_api::app::build_app;
use simflow_api::config::ServerConfig;
use simflow_api::state::AppState;
use simflow_worker::{task_queue, TaskReceiver};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
///
/// The task receiver is returned instead of being drained by a runner, so
/// tests can assert on what was dispatched without background runs racing
/// their assertions.
pub fn build_test_app(pool: PgPool) -> (Router, TaskReceiver) {
    let (tasks, receiver) = task_queue();
    let app = build_app(AppState::new(pool, test_config(), tasks));
    (app, receiver)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A create payload in the shape clients post.
pub fn simulation_payload(simulation_id: i64, name: &str, machine_id: i64) -> serde_json::Value {
    serde_json::json!({
        "simulation_id": simulation_id,
        "name": name,
        "machine_id": machine_id,
        "status": "running",
        "creation_date": "2024-03-05T21:16:03.326919",
        "update_date": "2024-03-05T21:16:03.326919",
        "machine": { "machine_id": machine_id, "name": "Machine Name" }
    })
}

/// Poll `check` until it returns true or `timeout` elapses.
pub async fn wait_until<F, Fut>(timeout: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check().await
}
