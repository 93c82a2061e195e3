//! OpenAI-compatible chat-completion client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::models::{CompletionRequest, ModelKind};
use super::provider::{AiError, CompletionProvider};
use crate::config::AiSettings;

pub struct ChatCompletionClient {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
    text_model: String,
    vision_model: String,
}

impl ChatCompletionClient {
    pub fn new(settings: &AiSettings) -> Self {
        Self {
            client: Client::new(),
            endpoint: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            text_model: settings.model.clone(),
            vision_model: settings.vision_model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }

    fn model_for(&self, kind: ModelKind) -> &str {
        match kind {
            ModelKind::Text => &self.text_model,
            ModelKind::Vision => &self.vision_model,
        }
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let (Some(endpoint), Some(api_key)) = (&self.endpoint, &self.api_key) else {
            return Err(AiError::NotConfigured);
        };

        let model = self.model_for(request.kind);
        let mut payload = json!({
            "model": model,
            "messages": request.messages,
        });
        if let Some(temperature) = request.temperature {
            payload["temperature"] = json!(temperature);
        }

        debug!("AI request to {} (model {})", endpoint, model);

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: String = response.text().await?.chars().take(200).collect();
            return Err(AiError::Status { status, body });
        }

        let body: Value = response.json().await?;
        extract_content(&body)
    }
}

fn extract_content(body: &Value) -> Result<String, AiError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or(AiError::MissingContent)
}
