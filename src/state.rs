use std::sync::Arc;

use crate::config::Config;
use crate::services::{AiService, FileService, ModelProvider, OpenRouterClient};
use crate::store::{DocumentStore, InMemoryStore};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DocumentStore>,
    pub files: Arc<FileService>,
    pub ai: Arc<AiService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let provider = Arc::new(OpenRouterClient::new(&config));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: Config, provider: Arc<dyn ModelProvider>) -> Self {
        let files = FileService::new(config.upload_dir.clone(), config.allowed_extensions.clone());
        let ai = AiService::new(provider, config.default_model.clone());

        Self {
            config: Arc::new(config),
            store: Arc::new(InMemoryStore::new()),
            files: Arc::new(files),
            ai: Arc::new(ai),
        }
    }
}
