//! Chat-completion client used by the content classifier.

mod client;
pub mod models;
mod provider;

pub use client::ChatCompletionClient;
pub use models::CompletionRequest;
pub use provider::{AiError, CompletionProvider};
