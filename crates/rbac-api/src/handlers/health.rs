use axum::Json;
use serde_json::{json, Value};

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "rbac-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
