//! Docchat
//!
//! Upload a PDF, text or markdown document and ask questions about it. Answers
//! come from a hosted chat-completion model prompted with the document text.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
