use std::env;
use std::fmt;
use std::path::PathBuf;
use anyhow::{Result, Context};
use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:free";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub default_model: String,
    pub upload_dir: PathBuf,
    pub allowed_extensions: Vec<String>,
    pub static_dir: PathBuf,
    pub max_file_size_mb: usize,
    pub chat_timeout_seconds: u64,
    pub models_timeout_seconds: u64,
    /// Ceiling for document processing. Loaded and reported, not enforced.
    pub max_wait_time_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            openrouter_api_key: None,
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: vec![".pdf".to_string(), ".txt".to_string(), ".md".to_string()],
            static_dir: PathBuf::from("static"),
            max_file_size_mb: 25,
            chat_timeout_seconds: 120,
            models_timeout_seconds: 10,
            max_wait_time_seconds: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let defaults = Self::default();

        let config = Config {
            server_host: Self::string_env_var("SERVER_HOST", &defaults.server_host),
            server_port: Self::parse_env_var("SERVER_PORT", defaults.server_port)
                .context("Failed to parse SERVER_PORT")?,
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            openrouter_base_url: Self::string_env_var("OPENROUTER_BASE_URL", &defaults.openrouter_base_url)
                .trim_end_matches('/')
                .to_string(),
            default_model: Self::string_env_var("DEFAULT_MODEL", &defaults.default_model),
            upload_dir: PathBuf::from(Self::string_env_var("UPLOAD_DIR", "uploads")),
            allowed_extensions: match env::var("ALLOWED_EXTENSIONS") {
                Ok(raw) => Self::parse_extensions(&raw),
                Err(_) => defaults.allowed_extensions.clone(),
            },
            static_dir: PathBuf::from(Self::string_env_var("STATIC_DIR", "static")),
            max_file_size_mb: Self::parse_env_var("MAX_FILE_SIZE_MB", defaults.max_file_size_mb)
                .context("Failed to parse MAX_FILE_SIZE_MB")?,
            chat_timeout_seconds: Self::parse_env_var("CHAT_TIMEOUT_SECONDS", defaults.chat_timeout_seconds)
                .context("Failed to parse CHAT_TIMEOUT_SECONDS")?,
            models_timeout_seconds: Self::parse_env_var("MODELS_TIMEOUT_SECONDS", defaults.models_timeout_seconds)
                .context("Failed to parse MODELS_TIMEOUT_SECONDS")?,
            max_wait_time_seconds: Self::parse_env_var("MAX_WAIT_TIME_SECONDS", defaults.max_wait_time_seconds)
                .context("Failed to parse MAX_WAIT_TIME_SECONDS")?,
        };

        config.validate()?;

        if config.openrouter_api_key.is_none() {
            warn!("OPENROUTER_API_KEY not set. Chat and model listing will fail until it is configured.");
        }

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn string_env_var(var_name: &str, default: &str) -> String {
        match env::var(var_name) {
            Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
            _ => {
                info!("{} not set, using default: {}", var_name, default);
                default.to_string()
            }
        }
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    /// Normalizes a comma separated list like `pdf, .TXT` into `[".pdf", ".txt"]`.
    pub fn parse_extensions(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .map(|s| if s.starts_with('.') { s } else { format!(".{}", s) })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        if self.chat_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("CHAT_TIMEOUT_SECONDS must be greater than 0"));
        }
        if self.models_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("MODELS_TIMEOUT_SECONDS must be greater than 0"));
        }
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!("ALLOWED_EXTENSIONS must list at least one extension"));
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked_key = self.openrouter_api_key.as_deref().map(|key| {
            let prefix: String = key.chars().take(6).collect();
            format!("{}...", prefix)
        });

        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("openrouter_api_key", &masked_key)
            .field("openrouter_base_url", &self.openrouter_base_url)
            .field("default_model", &self.default_model)
            .field("upload_dir", &self.upload_dir)
            .field("allowed_extensions", &self.allowed_extensions)
            .field("static_dir", &self.static_dir)
            .field("max_file_size_mb", &self.max_file_size_mb)
            .field("chat_timeout_seconds", &self.chat_timeout_seconds)
            .field("models_timeout_seconds", &self.models_timeout_seconds)
            .field("max_wait_time_seconds", &self.max_wait_time_seconds)
            .finish()
    }
}
