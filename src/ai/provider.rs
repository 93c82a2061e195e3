use async_trait::async_trait;
use thiserror::Error;

use super::models::CompletionRequest;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI endpoint is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response has no message content")]
    MissingContent,
}

/// A chat-completion backend. Implementations make exactly one attempt per call.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError>;
}
