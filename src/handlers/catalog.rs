use axum::{extract::State, response::Json};
use serde_json::Value;
use tracing::error;

use crate::error::AppResult;
use crate::state::AppState;

/// Relays the remote catalog of models available to the configured key.
pub async fn list_models_handler(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let catalog = state.ai.provider().list_models().await.map_err(|e| {
        error!(error = %e, "Model catalog request failed");
        e
    })?;

    Ok(Json(catalog))
}
