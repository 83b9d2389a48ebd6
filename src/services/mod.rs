pub mod ai_service;
pub mod file_service;
pub mod pdf_processor;

pub use ai_service::{AiService, ChatCompletionRequest, ModelProvider, OpenRouterClient};
pub use file_service::FileService;
pub use pdf_processor::{ExtractionResult, PdfProcessor};
