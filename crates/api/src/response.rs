//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "data": T }` response envelope, used for series-style payloads such
/// as `GET /converge/{id}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
