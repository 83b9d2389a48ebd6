pub mod catalog;
pub mod chat;
pub mod health;
pub mod pages;
pub mod stores;
pub mod upload;

pub use catalog::*;
pub use chat::*;
pub use health::*;
pub use pages::*;
pub use stores::*;
pub use upload::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::logging_middleware;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size_mb * 1024 * 1024;
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/upload", post(upload_handler))
        .route("/chat", post(chat_handler))
        .route("/stores", get(list_stores_handler))
        .route("/store/:store_id", delete(delete_store_handler))
        .route("/models", get(list_models_handler))
        .nest_service("/static", static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(axum::middleware::from_fn(logging_middleware)),
        )
        .with_state(state)
}
