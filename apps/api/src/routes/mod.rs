pub mod health;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/generate_questions",
            get(handlers::handle_generate_questions),
        )
        .route(
            "/generate_questions_from_resume",
            post(handlers::handle_generate_from_resume),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

/// Catch-all for unknown routes: a `detail` message plus the endpoint list,
/// instead of an empty 404 body.
async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "detail": "Endpoint not found",
            "available_endpoints": [
                "/",
                "/health",
                "/generate_questions",
                "/generate_questions_from_resume"
            ]
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_route_payload_lists_available_endpoints() {
        let (status, Json(body)) = not_found_handler().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Endpoint not found");
        let endpoints = body["available_endpoints"].as_array().unwrap();
        assert!(endpoints.iter().any(|e| e == "/generate_questions"));
        assert!(endpoints.iter().any(|e| e == "/generate_questions_from_resume"));
    }
}
