use axum::{extract::State, response::Json};
use std::time::Instant;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let start = Instant::now();

    let entry = state.store.get(&request.store_id).ok_or_else(|| {
        warn!(store_id = %request.store_id, "Chat requested for unknown document");
        AppError::DocumentNotFound
    })?;

    info!(
        store_id = %entry.store_id,
        question_chars = request.question.chars().count(),
        "Answering question"
    );

    let answer = state
        .ai
        .generate_response(&request.question, &entry.content, request.model.as_deref())
        .await?;

    info!(
        store_id = %entry.store_id,
        answer_chars = answer.chars().count(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Chat completed"
    );

    Ok(Json(ChatResponse::new(answer, entry.filename)))
}
