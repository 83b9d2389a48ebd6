use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{DeleteResponse, StoreInfo, StoresResponse};
use crate::state::AppState;

pub async fn list_stores_handler(State(state): State<AppState>) -> Json<StoresResponse> {
    let stores = state
        .store
        .list()
        .into_iter()
        .map(|entry| StoreInfo {
            store_id: entry.store_id,
            filename: entry.filename,
        })
        .collect();

    Json(StoresResponse { stores })
}

pub async fn delete_store_handler(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let entry = state.store.get(&store_id).ok_or(AppError::StoreNotFound)?;

    // The entry stays listed if its file cannot be removed.
    if let Err(e) = state.files.delete_file(&entry.file_path).await {
        warn!(store_id = %store_id, error = %e, "Failed to remove upload, keeping store");
        return Err(e);
    }

    state.store.delete(&store_id).ok_or(AppError::StoreNotFound)?;

    info!(store_id = %store_id, filename = %entry.filename, "Store deleted");

    Ok(Json(DeleteResponse::deleted()))
}
