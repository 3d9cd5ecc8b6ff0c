use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Welcome envelope doubling as an API health check.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the AI-Powered Interview Q&A Generator API",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health
/// Returns a simple status object.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "AI Q&A Generator"
    }))
}
