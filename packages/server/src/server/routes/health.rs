use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    model: String,
}

/// Health check endpoint
///
/// The service holds no connections of its own, so it is healthy whenever it
/// is serving. Reports the configured provider model.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            model: state.generator.config().model.clone(),
        }),
    )
}
