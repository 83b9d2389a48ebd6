use axum::{extract::State, response::Json};
use tracing::info;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let documents = state.store.len();
    let api_key_configured = state.config.has_api_key();

    let status = if api_key_configured { "healthy" } else { "degraded" };

    info!(
        status = status,
        documents = documents,
        api_key_configured = api_key_configured,
        "Health check completed"
    );

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        documents,
        api_key_configured,
    })
}
