//! Health endpoint.

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// `GET /api/health`
///
/// Liveness only: answers as soon as the server can route requests, with no
/// dependency checks.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
