//! Messaging platform collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Platform file id of an image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(pub String);

/// Public metadata of a channel or group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatInfo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("telegram request failed: {0}")]
    Request(String),

    #[error("file has no download path")]
    NoFilePath,
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), PlatformError>;

    /// Remove every send permission of the user in the chat.
    async fn restrict_send(&self, chat_id: i64, user_id: u64) -> Result<(), PlatformError>;

    /// Restore send permissions.
    async fn unrestrict(&self, chat_id: i64, user_id: u64) -> Result<(), PlatformError>;

    /// Send an HTML message, returning its id.
    async fn send_message(&self, chat_id: i64, html: &str) -> Result<i32, PlatformError>;

    /// Look up a public chat by `@handle` (handle given without the `@`).
    async fn get_chat_info(&self, handle: &str) -> Result<ChatInfo, PlatformError>;

    async fn get_user_bio(&self, user_id: u64) -> Result<Option<String>, PlatformError>;

    /// Largest size of the most recent profile photo.
    async fn get_avatar(&self, user_id: u64) -> Result<Option<ImageRef>, PlatformError>;

    /// Download URL for a file.
    async fn resolve_file(&self, image: &ImageRef) -> Result<String, PlatformError>;
}
