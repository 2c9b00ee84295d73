use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::core::error::AppError;

/// Boundary trait over the chat-completion API so the analysis service can be
/// exercised with a scripted model in tests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AppError>;
}

pub struct OpenAiClient {
    config: Arc<AppConfig>,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: Arc<AppConfig>, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.config.openai_api_base);
        let payload = json!({
            "model": self.config.openai_model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.openai_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                AppError::upstream(format!("network error contacting chat completions: {err}"))
            })?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "chat completion request failed with {}",
                response.status()
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|err| AppError::internal(format!("failed to parse completion json: {err}")))?;

        body.get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(|content| content.to_string())
            .ok_or_else(|| AppError::upstream("completion response carried no content".to_string()))
    }
}
