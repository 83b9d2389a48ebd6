use axum::{
    extract::{Multipart, State},
    response::Json,
};
use std::time::Instant;
use tracing::{info, error, debug};

use crate::error::{AppError, AppResult};
use crate::models::{UploadedFile, UploadResponse};
use crate::state::AppState;

pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let start = Instant::now();
    let store_id = uuid::Uuid::new_v4().to_string();

    info!(store_id = %store_id, "Starting document upload");

    let file = match extract_file_from_multipart(&mut multipart).await {
        Ok(file) => {
            info!(
                store_id = %store_id,
                file_name = %file.name,
                file_size = file.size,
                mime_type = ?file.mime_type,
                "File extracted from multipart form"
            );
            file
        }
        Err(e) => {
            error!(store_id = %store_id, error = %e, "Failed to extract file from multipart");
            return Err(e);
        }
    };

    let entry = match state.files.save_and_extract(&store_id, &file.name, file.content).await {
        Ok(entry) => entry,
        Err(e) => {
            error!(store_id = %store_id, file_name = %file.name, error = %e, "Document processing failed");
            return Err(e);
        }
    };

    let filename = entry.filename.clone();
    state.store.put(entry);

    info!(
        store_id = %store_id,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Upload completed successfully"
    );

    Ok(Json(UploadResponse::new(store_id, filename)))
}

async fn extract_file_from_multipart(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::internal(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|ct| ct.to_string());

        let data = field.bytes().await.map_err(|e| {
            AppError::internal(format!("Failed to read file data: {}", e))
        })?;

        let mut file = UploadedFile::new(file_name, data);
        if let Some(mime_type) = content_type {
            file = file.with_mime_type(mime_type);
        }

        debug!("Extracted file: {} ({} bytes, type: {:?})", file.name, file.size, file.mime_type);

        return Ok(file);
    }

    Err(AppError::MissingFile)
}
