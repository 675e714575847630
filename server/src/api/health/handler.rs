//! Health API Handlers

use axum::Json;
use serde_json::{Value, json};

use crate::utils::{ApiResponse, ok};
use crate::utils::time::now_millis;

/// GET /api/health - liveness probe
pub async fn health() -> Json<ApiResponse<Value>> {
    ok(json!({
        "status": "ok",
        "timestamp": now_millis(),
    }))
}
