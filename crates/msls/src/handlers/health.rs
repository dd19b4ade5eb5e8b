//! Health check endpoint.

use axum::Json;

/// GET /health - Always healthy; the server has no dependencies to probe.
#[axum::debug_handler]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "all's well" }))
}
