use bytes::Bytes;
use lopdf::Document;
use std::time::Instant;

use crate::error::{AppError, AppResult};

pub struct PdfProcessor;

#[derive(Debug)]
pub struct ExtractionResult {
    pub text: String,
    /// Known only when lopdf could parse the page tree.
    pub pages: Option<usize>,
    pub processing_time_ms: u64,
}

impl PdfProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts plain text from a PDF, page by page, on the blocking pool.
    pub async fn extract_text(&self, content: Bytes) -> AppResult<ExtractionResult> {
        tokio::task::spawn_blocking(move || Self::extract_blocking(&content))
            .await
            .map_err(|e| AppError::extraction(format!("Error extracting text from PDF: {}", e)))?
    }

    fn extract_blocking(content: &[u8]) -> AppResult<ExtractionResult> {
        let start = Instant::now();

        tracing::info!("Starting PDF text extraction ({} bytes)", content.len());

        let (text, pages) = match Self::extract_pages(content) {
            Ok((text, pages)) if !text.is_empty() => (text, Some(pages)),
            Ok((_, pages)) => {
                tracing::warn!("Page extraction produced no text, trying pdf-extract");
                let text = Self::extract_fallback(content).unwrap_or_else(|fallback_err| {
                    tracing::warn!(
                        "pdf-extract fallback failed: {:?}, treating document as empty",
                        fallback_err
                    );
                    String::new()
                });
                (text, Some(pages))
            }
            Err(e) => {
                tracing::warn!("Page extraction failed: {}, trying pdf-extract", e);
                let text = Self::extract_fallback(content).map_err(|fallback_err| {
                    tracing::error!("Both extraction strategies failed: {:?}", fallback_err);
                    AppError::extraction(format!("Error extracting text from PDF: {}", e))
                })?;
                (text, None)
            }
        };

        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "PDF processing completed in {}ms, {:?} pages, extracted {} characters",
            processing_time_ms,
            pages,
            text.chars().count()
        );

        Ok(ExtractionResult {
            text,
            pages,
            processing_time_ms,
        })
    }

    /// Every page's text followed by a single newline, surrounding whitespace trimmed.
    fn extract_pages(content: &[u8]) -> Result<(String, usize), lopdf::Error> {
        let doc = Document::load_mem(content)?;
        let pages = doc.get_pages();

        let mut text = String::new();
        for page_number in pages.keys() {
            // lopdf already ends each text block with a newline
            let page_text = doc.extract_text(&[*page_number])?;
            text.push_str(page_text.trim_end_matches(|c: char| c == '\r' || c == '\n'));
            text.push('\n');
        }

        Ok((text.trim().to_string(), pages.len()))
    }

    fn extract_fallback(content: &[u8]) -> Result<String, pdf_extract::OutputError> {
        let text = pdf_extract::extract_text_from_mem(content)?;
        tracing::debug!("pdf-extract fallback produced {} characters", text.len());
        Ok(text.trim().to_string())
    }
}

impl Default for PdfProcessor {
    fn default() -> Self {
        Self::new()
    }
}
