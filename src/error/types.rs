use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Document not found. Please upload a document first.")]
    DocumentNotFound,

    #[error("Store not found")]
    StoreNotFound,

    #[error("{message}")]
    ExtractionError { message: String },

    #[error("Error generating response: {message}")]
    GenerationError { message: String },

    #[error("API key not configured")]
    MissingApiKey,

    #[error("Request timeout")]
    UpstreamTimeout,

    #[error("API request failed: {message}")]
    UpstreamRequest { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            AppError::StoreNotFound => "STORE_NOT_FOUND",
            AppError::ExtractionError { .. } => "EXTRACTION_ERROR",
            AppError::GenerationError { .. } => "GENERATION_ERROR",
            AppError::MissingApiKey => "MISSING_API_KEY",
            AppError::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            AppError::UpstreamRequest { .. } => "UPSTREAM_REQUEST_FAILED",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DocumentNotFound | AppError::StoreNotFound => StatusCode::NOT_FOUND,
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let timestamp = chrono::Utc::now().to_rfc3339();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "API request rejected"
            );
        }

        let body = Json(json!({
            "success": false,
            "detail": message,
            "error": {
                "code": error_code,
                "message": message,
                "timestamp": timestamp
            }
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout
        } else {
            AppError::UpstreamRequest {
                message: err.to_string(),
            }
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("Background task failed: {}", err),
        }
    }
}

impl AppError {
    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::ExtractionError {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        AppError::GenerationError {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::UpstreamRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
