use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub store_id: String,
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub answer: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreInfo {
    pub store_id: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoresResponse {
    pub stores: Vec<StoreInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    pub documents: usize,
    pub api_key_configured: bool,
}

impl UploadResponse {
    pub fn new(store_id: String, filename: String) -> Self {
        Self {
            success: true,
            store_id,
            filename,
            message: "File uploaded and processed successfully".to_string(),
        }
    }
}

impl ChatResponse {
    pub fn new(answer: String, filename: String) -> Self {
        Self {
            success: true,
            answer,
            filename,
        }
    }
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: "Store deleted successfully".to_string(),
        }
    }
}
