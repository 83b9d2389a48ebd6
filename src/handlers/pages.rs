use axum::{extract::State, response::Html};
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Serves the browser client's landing page.
pub async fn index_handler(State(state): State<AppState>) -> AppResult<Html<String>> {
    let path = state.config.static_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Landing page unavailable");
            Err(AppError::internal(format!("Failed to read {}: {}", path.display(), e)))
        }
    }
}
