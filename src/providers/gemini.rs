use crate::config::AppConfig;
use crate::providers::traits::CompletionProvider;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini generateContent and embedContent endpoints. The key
/// is injected at construction; nothing here reads the process environment.
#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    model: String,
    embed_model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, embed_model: String) -> Self {
        Self {
            api_key,
            client: Client::new(),
            model,
            embed_model,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.model.clone(),
            config.embed_model.clone(),
        )
    }

    async fn generate_content(&self, prompt: &str, temperature: Option<f32>) -> Result<String> {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });
        if let Some(t) = temperature {
            body["generationConfig"] = json!({ "temperature": t });
        }

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", API_BASE, self.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let response_json: Value = response.json().await?;

        if let Some(message) = response_json["error"]["message"].as_str() {
            return Err(anyhow!("Gemini API error: {}", message));
        }

        response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Invalid response format from Gemini"))
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt, None).await
    }

    async fn complete_with_temperature(&self, prompt: &str, temperature: f32) -> Result<String> {
        self.generate_content(prompt, Some(temperature)).await
    }

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:embedContent",
                API_BASE, self.embed_model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "model": format!("models/{}", self.embed_model),
                "content": {
                    "parts": [{ "text": text }]
                }
            }))
            .send()
            .await?;

        let response_json: Value = response.json().await?;

        if let Some(message) = response_json["error"]["message"].as_str() {
            return Err(anyhow!("Gemini embedding error: {}", message));
        }

        let values = response_json["embedding"]["values"]
            .as_array()
            .ok_or_else(|| anyhow!("Invalid embedding response from Gemini"))?;

        values
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| anyhow!("Non-numeric value in embedding response"))
            })
            .collect()
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}
