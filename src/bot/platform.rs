//! [`ChatPlatform`] over the throttled teloxide bot.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatPermissions, MessageId, ParseMode, PhotoSize, Recipient};
use tracing::warn;

use super::dispatcher::ThrottledBot;
use crate::moderation::{ChatInfo, ChatPlatform, ImageRef, PlatformError};

impl From<teloxide::RequestError> for PlatformError {
    fn from(err: teloxide::RequestError) -> Self {
        Self::Request(err.to_string())
    }
}

/// Largest size is last in Telegram's photo arrays.
pub fn largest_photo(sizes: &[PhotoSize]) -> Option<ImageRef> {
    sizes.last().map(|p| ImageRef(p.file.id.clone()))
}

/// Permissions restored by an unban.
fn send_permissions() -> ChatPermissions {
    ChatPermissions::SEND_MESSAGES
        | ChatPermissions::SEND_MEDIA_MESSAGES
        | ChatPermissions::SEND_OTHER_MESSAGES
        | ChatPermissions::SEND_POLLS
        | ChatPermissions::ADD_WEB_PAGE_PREVIEWS
        | ChatPermissions::INVITE_USERS
}

#[derive(Clone)]
pub struct TelegramPlatform {
    bot: ThrottledBot,
}

impl TelegramPlatform {
    pub fn new(bot: ThrottledBot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), PlatformError> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn restrict_send(&self, chat_id: i64, user_id: u64) -> Result<(), PlatformError> {
        self.bot
            .restrict_chat_member(ChatId(chat_id), UserId(user_id), ChatPermissions::empty())
            .await?;
        Ok(())
    }

    async fn unrestrict(&self, chat_id: i64, user_id: u64) -> Result<(), PlatformError> {
        let restored = self
            .bot
            .restrict_chat_member(ChatId(chat_id), UserId(user_id), send_permissions())
            .await;

        if let Err(e) = restored {
            // Restricting fails for users who were banned or left; unban instead.
            warn!("Restore for {} in {} failed ({}), unbanning", user_id, chat_id, e);
            self.bot
                .unban_chat_member(ChatId(chat_id), UserId(user_id))
                .only_if_banned(false)
                .await?;
        }
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, html: &str) -> Result<i32, PlatformError> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), html)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(sent.id.0)
    }

    async fn get_chat_info(&self, handle: &str) -> Result<ChatInfo, PlatformError> {
        let chat = self
            .bot
            .get_chat(Recipient::ChannelUsername(format!("@{handle}")))
            .await?;
        Ok(ChatInfo {
            title: chat.title().map(String::from),
            description: chat.description().or(chat.bio()).map(String::from),
        })
    }

    async fn get_user_bio(&self, user_id: u64) -> Result<Option<String>, PlatformError> {
        let chat = self.bot.get_chat(UserId(user_id)).await?;
        Ok(chat.bio().map(String::from))
    }

    async fn get_avatar(&self, user_id: u64) -> Result<Option<ImageRef>, PlatformError> {
        let photos = self
            .bot
            .get_user_profile_photos(UserId(user_id))
            .limit(1)
            .await?;
        Ok(photos.photos.first().and_then(|sizes| largest_photo(sizes)))
    }

    async fn resolve_file(&self, image: &ImageRef) -> Result<String, PlatformError> {
        let file = self.bot.get_file(image.0.clone()).await?;
        if file.path.is_empty() {
            return Err(PlatformError::NoFilePath);
        }

        let inner = self.bot.inner();
        Ok(format!(
            "{}/file/bot{}/{}",
            inner.api_url().as_str().trim_end_matches('/'),
            inner.token(),
            file.path
        ))
    }
}
