use anyhow::{anyhow, Result};
use std::env;

/// Runtime configuration, read from the environment exactly once at startup
/// and passed down explicitly. A missing API key is fatal here; the pipeline
/// never consults ambient state afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub embed_model: String,
    pub qdrant_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_key(None)
    }

    /// Same as [`from_env`](Self::from_env), with an optional key override
    /// (the `--api-key` flag) taking precedence over the environment.
    pub fn from_env_with_key(api_key_override: Option<String>) -> Result<Self> {
        let api_key = match api_key_override {
            Some(key) => key,
            None => env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow!("GEMINI_API_KEY environment variable is not set"))?,
        };

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string());

        let embed_model =
            env::var("GEMINI_EMBED_MODEL").unwrap_or_else(|_| "embedding-001".to_string());

        let qdrant_url =
            env::var("QDRANT_URL").unwrap_or_else(|_| "http://localhost:6334".to_string());

        Ok(Self {
            api_key,
            model,
            embed_model,
            qdrant_url,
        })
    }
}
