//! Service-level endpoints: API index and health check.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

/// API version reported by the index.
const API_VERSION: &str = "1.0.0";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: f64,
}

/// GET /
async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the Tomatoes API",
        "version": API_VERSION,
        "endpoints": {
            "GET /tomatoes": "Get all tomatoes",
            "GET /tomatoes/:id": "Get a specific tomato",
            "GET /tomatoes/search/name/:name": "Search tomatoes by name",
            "GET /tomatoes/search/variety/:variety": "Search tomatoes by variety",
            "GET /tomatoes/search/price/:price": "Search tomatoes by exact price",
            "POST /tomatoes": "Create a new tomato",
            "PUT /tomatoes/:id": "Update a tomato",
            "DELETE /tomatoes/:id": "Delete a tomato"
        }
    }))
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
