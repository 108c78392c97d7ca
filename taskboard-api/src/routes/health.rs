/// Health check endpoint

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// Liveness probe
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
