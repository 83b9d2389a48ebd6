use bytes::Bytes;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::services::PdfProcessor;
use crate::store::StoreEntry;

/// Persists uploads under server-generated names and turns them into text.
pub struct FileService {
    upload_dir: PathBuf,
    allowed_extensions: Vec<String>,
    pdf: PdfProcessor,
}

impl FileService {
    pub fn new(upload_dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            pdf: PdfProcessor::new(),
        }
    }

    /// Returns the extension as the client wrote it, dot included.
    pub fn validate_extension(&self, filename: &str) -> AppResult<String> {
        let extension = extension_of(filename);
        if self.allowed_extensions.contains(&extension.to_lowercase()) {
            Ok(extension)
        } else {
            Err(AppError::UnsupportedFileType { extension })
        }
    }

    pub async fn save_and_extract(
        &self,
        store_id: &str,
        filename: &str,
        content: Bytes,
    ) -> AppResult<StoreEntry> {
        let extension = self.validate_extension(filename)?;

        // The client filename never reaches the filesystem.
        let file_path = self.upload_dir.join(format!("{}{}", store_id, extension));

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::write(&file_path, &content).await?;

        debug!(
            store_id = %store_id,
            path = %file_path.display(),
            bytes = content.len(),
            "Upload persisted"
        );

        let text = match self.extract_text(&file_path, content).await {
            Ok(text) => text,
            Err(e) => {
                warn!(store_id = %store_id, error = %e, "Extraction failed, removing upload");
                self.delete_file(&file_path).await?;
                return Err(e);
            }
        };

        info!(
            store_id = %store_id,
            filename = %filename,
            characters = text.chars().count(),
            "Document content extracted"
        );

        Ok(StoreEntry {
            store_id: store_id.to_string(),
            filename: filename.to_string(),
            file_path,
            content: text,
            uploaded_at: Utc::now(),
        })
    }

    /// Dispatches on the stored file's extension.
    pub async fn extract_text(&self, file_path: &Path, content: Bytes) -> AppResult<String> {
        let extension = extension_of(&file_path.to_string_lossy()).to_lowercase();

        match extension.as_str() {
            ".pdf" => {
                let result = self.pdf.extract_text(content).await?;
                debug!(
                    pages = ?result.pages,
                    processing_time_ms = result.processing_time_ms,
                    "PDF text extracted"
                );
                Ok(result.text)
            }
            ".txt" | ".md" => String::from_utf8(content.to_vec())
                .map_err(|e| AppError::extraction(format!("Error reading text file: {}", e))),
            _ => Err(AppError::UnsupportedFileType { extension: extension.clone() }),
        }
    }

    /// Removes the file if it is still there.
    pub async fn delete_file(&self, file_path: &Path) -> AppResult<()> {
        match tokio::fs::remove_file(file_path).await {
            Ok(()) => {
                debug!(path = %file_path.display(), "Removed upload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
