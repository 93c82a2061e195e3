//! Judged text surface of a message.
//!
//! Segments are appended in a fixed order and each carries a provenance
//! tag, so the classifier can tell what the sender wrote from what they
//! are relaying through a reply, quote or cross-chat reply.

use super::message::InboundMessage;
use super::ports::{ChatInfo, ImageRef};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub text: String,
    /// At most one image is judged per message.
    pub image: Option<ImageRef>,
}

impl ScanContext {
    pub fn build(message: &InboundMessage) -> Self {
        let mut text = message.body().unwrap_or_default().to_string();

        if let Some(reply) = &message.reply {
            let label = reply.sender_label.as_deref().unwrap_or("Unknown");
            let body = match reply.text.as_deref().filter(|t| !t.is_empty()) {
                Some(t) => t,
                None if reply.has_photo => "[Photo]",
                None if reply.has_contact => "[Contact]",
                None => "",
            };
            text.push_str(&format!("\n[ReplyTo {label}]: {body}"));
        }

        if let Some(quote) = message.quote.as_deref().filter(|q| !q.is_empty()) {
            text.push_str(&format!("\n[Quote]: {quote}"));
        }

        if let Some(external) = &message.external {
            let title = external.title.as_deref().unwrap_or("Unknown");
            let body = external.text.as_deref().unwrap_or_default();
            text.push_str(&format!("\n[ExternalSource]: {title} - {body}"));
        }

        let image = message
            .photo
            .clone()
            .or_else(|| message.external.as_ref().and_then(|e| e.photo.clone()));

        Self { text, image }
    }

    /// Append metadata of a chat linked from the text.
    pub fn append_linked_chat(&mut self, info: &ChatInfo) {
        let title = info.title.as_deref().unwrap_or("Unknown");
        let desc = info.description.as_deref().unwrap_or_default();
        self.text
            .push_str(&format!("\n\n[LinkedChat]\nTitle: {title}\nDesc: {desc}"));
    }

    /// Too short to be worth a classifier call. Length is in UTF-16 units,
    /// as Telegram measures text, so a pair of emoji still gets classified.
    pub fn is_trivial(&self) -> bool {
        self.text.trim().encode_utf16().count() <= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::message::{ExternalRef, ReplyRef, Sender};
    use crate::moderation::testing::text_message;

    fn base(text: &str) -> InboundMessage {
        let sender = Sender {
            id: 1,
            first_name: "Ann".into(),
            last_name: None,
        };
        text_message(-100, 1, sender, text)
    }

    #[test]
    fn segments_keep_fixed_order_and_tags() {
        let mut msg = base("hi");
        msg.reply = Some(ReplyRef {
            sender_label: Some("Shop".into()),
            text: Some("cheap".into()),
            ..Default::default()
        });
        msg.quote = Some("quoted".into());
        msg.external = Some(ExternalRef {
            title: Some("Chan".into()),
            text: None,
            photo: None,
        });

        let ctx = ScanContext::build(&msg);
        assert_eq!(
            ctx.text,
            "hi\n[ReplyTo Shop]: cheap\n[Quote]: quoted\n[ExternalSource]: Chan - "
        );
    }

    #[test]
    fn reply_without_text_uses_placeholder() {
        let mut msg = base("");
        msg.reply = Some(ReplyRef {
            has_photo: true,
            ..Default::default()
        });
        assert_eq!(ScanContext::build(&msg).text, "\n[ReplyTo Unknown]: [Photo]");

        msg.reply = Some(ReplyRef {
            has_contact: true,
            ..Default::default()
        });
        assert_eq!(ScanContext::build(&msg).text, "\n[ReplyTo Unknown]: [Contact]");
    }

    #[test]
    fn caption_used_when_text_missing() {
        let mut msg = base("");
        msg.text = None;
        msg.caption = Some("caption".into());
        assert_eq!(ScanContext::build(&msg).text, "caption");
    }

    #[test]
    fn primary_photo_preferred_over_external() {
        let mut msg = base("x");
        msg.external = Some(ExternalRef {
            photo: Some(ImageRef("ext".into())),
            ..Default::default()
        });
        assert_eq!(ScanContext::build(&msg).image, Some(ImageRef("ext".into())));

        msg.photo = Some(ImageRef("own".into()));
        assert_eq!(ScanContext::build(&msg).image, Some(ImageRef("own".into())));
    }

    #[test]
    fn linked_chat_block_and_trivial_check() {
        let mut ctx = ScanContext {
            text: " ok ".into(),
            image: None,
        };
        assert!(ctx.is_trivial());

        ctx.append_linked_chat(&ChatInfo {
            title: Some("Deals".into()),
            description: None,
        });
        assert!(ctx.text.ends_with("\n\n[LinkedChat]\nTitle: Deals\nDesc: "));
        assert!(!ctx.is_trivial());
    }

    #[test]
    fn trivial_length_counts_utf16_units() {
        let ctx = |text: &str| ScanContext {
            text: text.into(),
            image: None,
        };
        assert!(ctx("好的").is_trivial());
        assert!(ctx("😀").is_trivial());
        // two astral-plane emoji are four UTF-16 units
        assert!(!ctx("😀😀").is_trivial());
        assert!(!ctx("好的吗").is_trivial());
    }
}
