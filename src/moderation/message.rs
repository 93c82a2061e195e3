//! Platform-neutral view of an inbound chat message.

use super::ports::ImageRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// The message being replied to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyRef {
    /// Forwarded-from title, sender chat title, or author first name
    pub sender_label: Option<String>,
    pub text: Option<String>,
    pub has_photo: bool,
    pub has_contact: bool,
}

/// A reply to a message from another chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalRef {
    pub title: Option<String>,
    pub text: Option<String>,
    pub photo: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub message_id: i32,
    pub sender: Sender,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub has_contact: bool,
    pub has_photo: bool,
    pub photo: Option<ImageRef>,
    /// `url` or `text_link` entity present
    pub has_link_entity: bool,
    pub is_forward: bool,
    pub reply: Option<ReplyRef>,
    pub quote: Option<String>,
    pub external: Option<ExternalRef>,
}

impl InboundMessage {
    /// Text if present, else caption.
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }
}
