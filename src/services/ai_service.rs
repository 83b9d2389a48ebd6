//! Question answering over an uploaded document via a hosted chat-completion API.
//!
//! The document text is cut to [`MAX_CONTENT_CHARS`] and embedded, together with
//! the question, into a single instruction prompt. Nothing is retried.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub const MAX_CONTENT_CHARS: usize = 10_000;
pub const TRUNCATION_MARKER: &str = "...";
pub const MAX_TOKENS: u32 = 2000;
pub const TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Remote model backend.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the raw text of the first completion choice.
    async fn chat_completion(&self, request: &ChatCompletionRequest) -> AppResult<String>;

    /// Relays the provider's model catalog untouched.
    async fn list_models(&self) -> AppResult<Value>;
}

pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    chat_timeout: Duration,
    models_timeout: Duration,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.openrouter_api_key.clone(),
            base_url: config.openrouter_base_url.trim_end_matches('/').to_string(),
            chat_timeout: Duration::from_secs(config.chat_timeout_seconds),
            models_timeout: Duration::from_secs(config.models_timeout_seconds),
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }
}

#[async_trait]
impl ModelProvider for OpenRouterClient {
    async fn chat_completion(&self, request: &ChatCompletionRequest) -> AppResult<String> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.base_url);

        debug!(url = %url, model = %request.model, "Sending chat completion request");

        let response: ChatCompletionResponse = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .timeout(self.chat_timeout)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::upstream("response contained no choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| AppError::upstream("response message had no content"))
    }

    async fn list_models(&self) -> AppResult<Value> {
        let api_key = self.api_key()?;
        let url = format!("{}/models/user", self.base_url);

        info!(url = %url, "Fetching model catalog");

        let response = self
            .http
            .get(&url)
            .bearer_auth(api_key)
            .timeout(self.models_timeout)
            .send()
            .await?;

        debug!(status = %response.status(), "Model catalog responded");

        let data: Value = response.error_for_status()?.json().await?;
        let count = data
            .get("data")
            .and_then(Value::as_array)
            .map(|models| models.len())
            .unwrap_or(0);
        info!(models = count, "Received model catalog");

        Ok(data)
    }
}

pub struct AiService {
    provider: Arc<dyn ModelProvider>,
    default_model: String,
}

impl AiService {
    pub fn new(provider: Arc<dyn ModelProvider>, default_model: impl Into<String>) -> Self {
        Self {
            provider,
            default_model: default_model.into(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }

    pub async fn generate_response(
        &self,
        question: &str,
        document_content: &str,
        model: Option<&str>,
    ) -> AppResult<String> {
        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str());

        let content = truncate_content(document_content);
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(&content, question),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        info!(
            model = %model,
            content_chars = content.chars().count(),
            "Generating answer"
        );

        match self.provider.chat_completion(&request).await {
            Ok(answer) => Ok(answer.trim().to_string()),
            Err(e) => {
                warn!(model = %model, error = %e, "Answer generation failed");
                Err(AppError::generation(e.to_string()))
            }
        }
    }
}

/// Cuts `content` to [`MAX_CONTENT_CHARS`] characters and marks the cut.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_offset, _)) => format!("{}{}", &content[..byte_offset], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}

pub fn build_prompt(document_content: &str, question: &str) -> String {
    format!(
        r#"You are a helpful assistant that answers questions based on the provided document.

DOCUMENT CONTENT:
{document_content}

TASK:
Answer the following question using ONLY information from the document above. The user may ask in Thai or English - respond in the same language they use.

QUESTION:
{question}

INSTRUCTIONS:
1. Search the document thoroughly for relevant information
2. Provide accurate, complete answers based only on the document content
3. If the document contains tables, charts, or structured data:
   - Present numerical data in clear, organized tables
   - Use markdown table format: | Column 1 | Column 2 |
4. Structure your response with:
   - Clear headings using ## for main topics and ### for subtopics
   - Bullet points (-) for lists
   - **Bold** for important terms or values
5. If there are multiple recipes, formulas, or steps:
   - Separate each one clearly with headings
   - Number steps when showing procedures
6. If the question asks for specific data from tables:
   - Present it in table format for easy reading
   - Include column headers and organize rows logically
7. Response language:
   - If the question is in Thai, respond in Thai
   - If the question is in English, respond in English
   - Maintain professional, clear language

IMPORTANT:
- Only use information from the document
- If information is not in the document, say so clearly
- Cite specific sections when relevant
- Format tables properly for readability
"#
    )
}
