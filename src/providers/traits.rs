use anyhow::Result;
use async_trait::async_trait;
use std::any::Any;

#[async_trait]
pub trait CompletionProvider: Any + Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Completion with an explicit sampling temperature; used by the
    /// retrieval chain, which carries a per-mode temperature.
    async fn complete_with_temperature(&self, prompt: &str, temperature: f32) -> Result<String>;

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>>;

    async fn get_model_info(&self) -> Result<String>;

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync>;
}

impl Clone for Box<dyn CompletionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
