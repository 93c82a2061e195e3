//! Conversion of teloxide messages into [`InboundMessage`].

use teloxide::types::{
    ExternalReplyInfo, ExternalReplyInfoKind, Message, MessageEntityKind, MessageKind,
    MessageOrigin,
};

use super::platform::largest_photo;
use crate::moderation::message::{ExternalRef, ReplyRef, Sender};
use crate::moderation::InboundMessage;

/// `None` for messages not written by a member as themselves.
///
/// Anonymous admins arrive from `GroupAnonymousBot` and linked-channel posts
/// are auto-forwarded by the service account 777000; both carry
/// `sender_chat`. Restricting those accounts would hit the chat itself.
pub fn to_inbound(msg: &Message) -> Option<InboundMessage> {
    if msg.sender_chat.is_some() || is_automatic_forward(msg) {
        return None;
    }
    let from = msg.from.as_ref()?;

    let photo = msg.photo().and_then(largest_photo);
    let has_link_entity = msg
        .entities()
        .into_iter()
        .chain(msg.caption_entities())
        .flatten()
        .any(|e| matches!(e.kind, MessageEntityKind::Url | MessageEntityKind::TextLink { .. }));

    Some(InboundMessage {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        sender: Sender {
            id: from.id.0,
            first_name: from.first_name.clone(),
            last_name: from.last_name.clone(),
        },
        text: msg.text().map(String::from),
        caption: msg.caption().map(String::from),
        has_contact: msg.contact().is_some(),
        has_photo: photo.is_some(),
        photo,
        has_link_entity,
        is_forward: msg.forward_origin().is_some(),
        reply: msg.reply_to_message().map(reply_ref),
        quote: msg.quote().map(|q| q.text.clone()),
        external: external_reply(msg).map(external_ref),
    })
}

fn is_automatic_forward(msg: &Message) -> bool {
    matches!(&msg.kind, MessageKind::Common(common) if common.is_automatic_forward)
}

fn origin_chat_title(origin: &MessageOrigin) -> Option<String> {
    match origin {
        MessageOrigin::Chat { sender_chat, .. } => sender_chat.title().map(String::from),
        MessageOrigin::Channel { chat, .. } => chat.title().map(String::from),
        _ => None,
    }
}

fn reply_ref(reply: &Message) -> ReplyRef {
    let sender_label = reply
        .forward_origin()
        .and_then(origin_chat_title)
        .or_else(|| {
            reply
                .sender_chat
                .as_ref()
                .and_then(|c| c.title().map(String::from))
        })
        .or_else(|| reply.from.as_ref().map(|u| u.first_name.clone()));

    ReplyRef {
        sender_label,
        text: reply.text().or(reply.caption()).map(String::from),
        has_photo: reply.photo().is_some(),
        has_contact: reply.contact().is_some(),
    }
}

fn external_reply(msg: &Message) -> Option<&ExternalReplyInfo> {
    match &msg.kind {
        MessageKind::Common(common) => common.external_reply.as_ref(),
        _ => None,
    }
}

fn external_ref(ext: &ExternalReplyInfo) -> ExternalRef {
    let title = origin_chat_title(&ext.origin)
        .or_else(|| ext.chat.as_ref().and_then(|c| c.title().map(String::from)));
    let photo = match &ext.kind {
        ExternalReplyInfoKind::Photo(sizes) => largest_photo(sizes),
        _ => None,
    };

    ExternalRef {
        title,
        text: None,
        photo,
    }
}
