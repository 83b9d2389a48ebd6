//! Unit tests for individual components

use async_trait::async_trait;
use bytes::Bytes;
use docchat::{
    config::{Config, DEFAULT_MODEL},
    error::AppError,
    services::{
        ai_service::{build_prompt, truncate_content, MAX_CONTENT_CHARS, MAX_TOKENS, TEMPERATURE, TRUNCATION_MARKER},
        AiService, ChatCompletionRequest, FileService, ModelProvider,
    },
};
use serde_json::{json, Value};
use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

struct RecordingProvider {
    answer: Result<String, String>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl RecordingProvider {
    fn answering(answer: &str) -> Self {
        Self {
            answer: Ok(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn last_request(&self) -> ChatCompletionRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

#[async_trait]
impl ModelProvider for RecordingProvider {
    async fn chat_completion(&self, request: &ChatCompletionRequest) -> docchat::AppResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone().map_err(AppError::upstream)
    }

    async fn list_models(&self) -> docchat::AppResult<Value> {
        Ok(json!({ "data": [] }))
    }
}

fn text_service(dir: &tempfile::TempDir) -> FileService {
    FileService::new(dir.path(), Config::default().allowed_extensions)
}

#[test]
fn test_config_from_env() {
    env::set_var("SERVER_PORT", "9100");
    env::set_var("UPLOAD_DIR", "/tmp/docchat-uploads");
    env::set_var("ALLOWED_EXTENSIONS", "pdf, .TXT");
    env::set_var("OPENROUTER_API_KEY", "sk-or-test-1234567890");
    env::set_var("MODELS_TIMEOUT_SECONDS", "not-a-number");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_port, 9100);
    assert_eq!(config.upload_dir, PathBuf::from("/tmp/docchat-uploads"));
    assert_eq!(config.allowed_extensions, vec![".pdf", ".txt"]);
    assert!(config.has_api_key());
    // Unparseable values fall back to the default
    assert_eq!(config.models_timeout_seconds, 10);

    let debug = format!("{:?}", config);
    assert!(!debug.contains("sk-or-test-1234567890"));
    assert!(debug.contains("sk-or-..."));

    for var in [
        "SERVER_PORT",
        "UPLOAD_DIR",
        "ALLOWED_EXTENSIONS",
        "OPENROUTER_API_KEY",
        "MODELS_TIMEOUT_SECONDS",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.allowed_extensions, vec![".pdf", ".txt", ".md"]);
    assert_eq!(config.upload_dir, PathBuf::from("uploads"));
    assert_eq!(config.default_model, DEFAULT_MODEL);
    assert_eq!(config.models_timeout_seconds, 10);
    assert!(!config.has_api_key());
}

#[test]
fn test_error_status_codes() {
    use axum::http::StatusCode;

    assert_eq!(AppError::DocumentNotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::StoreNotFound.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        AppError::UnsupportedFileType { extension: ".exe".to_string() }.status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(AppError::extraction("bad").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::generation("bad").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::MissingApiKey.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::UpstreamTimeout.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        AppError::UnsupportedFileType { extension: ".exe".to_string() }.to_string(),
        "Unsupported file type: .exe"
    );
    assert_eq!(AppError::StoreNotFound.to_string(), "Store not found");
    assert_eq!(AppError::MissingApiKey.to_string(), "API key not configured");
    assert_eq!(AppError::UpstreamTimeout.to_string(), "Request timeout");
    assert_eq!(
        AppError::upstream("connection refused").to_string(),
        "API request failed: connection refused"
    );
    assert_eq!(AppError::generation("boom").to_string(), "Error generating response: boom");
    assert_eq!(AppError::UpstreamTimeout.error_code(), "UPSTREAM_TIMEOUT");
}

#[test]
fn test_error_conversions() {
    let app_error: AppError = anyhow::anyhow!("Test error").into();
    match app_error {
        AppError::Internal { message } => assert!(message.contains("Test error")),
        _ => panic!("Expected Internal error"),
    }

    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let app_error: AppError = io_error.into();
    match app_error {
        AppError::Internal { message } => assert!(message.contains("IO error")),
        _ => panic!("Expected Internal error"),
    }
}

#[test]
fn test_truncate_keeps_short_content() {
    let text = "Paris is the capital of France.";
    assert_eq!(truncate_content(text), text);

    let exact = "a".repeat(MAX_CONTENT_CHARS);
    assert_eq!(truncate_content(&exact), exact);
}

#[test]
fn test_truncate_long_content() {
    let long = "b".repeat(MAX_CONTENT_CHARS + 1);
    let truncated = truncate_content(&long);

    assert!(truncated.ends_with(TRUNCATION_MARKER));
    assert_eq!(truncated.chars().count(), MAX_CONTENT_CHARS + TRUNCATION_MARKER.len());
}

#[test]
fn test_truncate_counts_characters_not_bytes() {
    // Thai characters are three bytes each in UTF-8
    let thai = "ก".repeat(MAX_CONTENT_CHARS + 5);
    let truncated = truncate_content(&thai);

    assert_eq!(truncated, format!("{}{}", "ก".repeat(MAX_CONTENT_CHARS), TRUNCATION_MARKER));
}

#[test]
fn test_prompt_embeds_document_and_question() {
    let prompt = build_prompt("Paris is the capital of France.", "What is the capital of France?");

    assert!(prompt.contains("DOCUMENT CONTENT:\nParis is the capital of France."));
    assert!(prompt.contains("QUESTION:\nWhat is the capital of France?"));
    assert!(prompt.contains("respond in the same language they use"));
    assert!(prompt.contains("| Column 1 | Column 2 |"));
}

#[tokio::test]
async fn test_generate_response_trims_and_uses_default_model() {
    let provider = Arc::new(RecordingProvider::answering("\n  The capital is **Paris**.  \n"));
    let service = AiService::new(provider.clone(), DEFAULT_MODEL);

    let answer = service
        .generate_response("What is the capital?", "Paris is the capital of France.", None)
        .await
        .unwrap();
    assert_eq!(answer, "The capital is **Paris**.");

    let request = provider.last_request();
    assert_eq!(request.model, DEFAULT_MODEL);
    assert_eq!(request.max_tokens, MAX_TOKENS);
    assert_eq!(request.temperature, TEMPERATURE);
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");

    service
        .generate_response("Again?", "text", Some("anthropic/claude-3-haiku"))
        .await
        .unwrap();
    assert_eq!(provider.last_request().model, "anthropic/claude-3-haiku");

    service.generate_response("Blank model?", "text", Some("  ")).await.unwrap();
    assert_eq!(provider.last_request().model, DEFAULT_MODEL);
}

#[tokio::test]
async fn test_generate_response_wraps_provider_failure() {
    let provider = Arc::new(RecordingProvider::failing("401 Unauthorized"));
    let service = AiService::new(provider, DEFAULT_MODEL);

    let err = service.generate_response("q", "text", None).await.unwrap_err();
    match &err {
        AppError::GenerationError { message } => assert!(message.contains("401 Unauthorized")),
        other => panic!("Expected GenerationError, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Error generating response:"));
}

#[test]
fn test_validate_extension() {
    let dir = tempfile::tempdir().unwrap();
    let files = text_service(&dir);

    assert_eq!(files.validate_extension("report.pdf").unwrap(), ".pdf");
    assert_eq!(files.validate_extension("NOTES.TXT").unwrap(), ".TXT");
    assert_eq!(files.validate_extension("../../etc/readme.md").unwrap(), ".md");

    match files.validate_extension("payload.exe") {
        Err(AppError::UnsupportedFileType { extension }) => assert_eq!(extension, ".exe"),
        other => panic!("Expected UnsupportedFileType, got {:?}", other),
    }
    assert!(files.validate_extension("no_extension").is_err());
}

#[tokio::test]
async fn test_save_and_extract_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("nested").join("uploads");
    let files = FileService::new(&upload_dir, Config::default().allowed_extensions);

    let entry = files
        .save_and_extract("abc123", "Notes.MD", Bytes::from_static(b"# Title\n\nBody text\n"))
        .await
        .unwrap();

    assert_eq!(entry.store_id, "abc123");
    assert_eq!(entry.filename, "Notes.MD");
    assert_eq!(entry.file_path, upload_dir.join("abc123.MD"));
    // Text formats are kept verbatim
    assert_eq!(entry.content, "# Title\n\nBody text\n");
    assert!(entry.file_path.exists());
}

#[tokio::test]
async fn test_invalid_utf8_is_an_extraction_error_and_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let files = text_service(&dir);

    let err = files
        .save_and_extract("bad-bytes", "binary.txt", Bytes::from_static(&[0xff, 0xfe, 0x00, 0xc3]))
        .await
        .unwrap_err();

    match err {
        AppError::ExtractionError { message } => assert!(message.starts_with("Error reading text file")),
        other => panic!("Expected ExtractionError, got {:?}", other),
    }
    assert!(!dir.path().join("bad-bytes.txt").exists());
}

#[tokio::test]
async fn test_delete_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let files = text_service(&dir);
    let path = dir.path().join("gone.txt");
    std::fs::write(&path, "bye").unwrap();

    files.delete_file(&path).await.unwrap();
    assert!(!path.exists());
    files.delete_file(&path).await.unwrap();
}
