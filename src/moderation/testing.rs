//! In-test collaborators.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::FixedOffset;
use dashmap::DashMap;
use parking_lot::Mutex;

use super::engine::ModerationEngine;
use super::message::{InboundMessage, Sender};
use super::ports::{ChatInfo, ChatPlatform, ImageRef, PlatformError};
use super::trust::RandomSource;
use crate::ai::models::{AiContent, ContentPart};
use crate::ai::{AiError, CompletionProvider, CompletionRequest};
use crate::cache::{CacheConfig, TypedCache};

pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Delete(i64, i32),
    Restrict(i64, u64),
    Unrestrict(i64, u64),
    Send(i64, String),
    ChatInfo(String),
    Bio(u64),
    Avatar(u64),
    Resolve(String),
}

/// Records every call. Lookups answer from the configured fields.
#[derive(Default)]
pub struct MockPlatform {
    pub calls: Mutex<Vec<PlatformCall>>,
    pub chats: DashMap<String, ChatInfo>,
    pub avatar: Option<ImageRef>,
    pub bio: Option<String>,
    pub fail_delete: bool,
    pub fail_restrict: bool,
    pub fail_send: bool,
    pub fail_resolve: bool,
    pub next_id: AtomicI32,
}

impl MockPlatform {
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&PlatformCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().push(call);
    }
}

fn fail(what: &str) -> PlatformError {
    PlatformError::Request(format!("{what} failed"))
}

#[async_trait]
impl ChatPlatform for MockPlatform {
    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), PlatformError> {
        self.record(PlatformCall::Delete(chat_id, message_id));
        if self.fail_delete {
            return Err(fail("delete"));
        }
        Ok(())
    }

    async fn restrict_send(&self, chat_id: i64, user_id: u64) -> Result<(), PlatformError> {
        self.record(PlatformCall::Restrict(chat_id, user_id));
        if self.fail_restrict {
            return Err(fail("restrict"));
        }
        Ok(())
    }

    async fn unrestrict(&self, chat_id: i64, user_id: u64) -> Result<(), PlatformError> {
        self.record(PlatformCall::Unrestrict(chat_id, user_id));
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, html: &str) -> Result<i32, PlatformError> {
        self.record(PlatformCall::Send(chat_id, html.to_string()));
        if self.fail_send {
            return Err(fail("send"));
        }
        Ok(500 + self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn get_chat_info(&self, handle: &str) -> Result<ChatInfo, PlatformError> {
        self.record(PlatformCall::ChatInfo(handle.to_string()));
        self.chats
            .get(handle)
            .map(|c| c.clone())
            .ok_or_else(|| fail("getChat"))
    }

    async fn get_user_bio(&self, user_id: u64) -> Result<Option<String>, PlatformError> {
        self.record(PlatformCall::Bio(user_id));
        Ok(self.bio.clone())
    }

    async fn get_avatar(&self, user_id: u64) -> Result<Option<ImageRef>, PlatformError> {
        self.record(PlatformCall::Avatar(user_id));
        Ok(self.avatar.clone())
    }

    async fn resolve_file(&self, image: &ImageRef) -> Result<String, PlatformError> {
        self.record(PlatformCall::Resolve(image.0.clone()));
        if self.fail_resolve {
            return Err(fail("getFile"));
        }
        Ok(format!("https://files.test/{}", image.0))
    }
}

/// Answers per policy prompt; `None` answers simulate a transport failure.
pub struct MockProvider {
    by_policy: DashMap<String, Option<String>>,
    default: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn answering(answer: &str) -> Self {
        Self {
            by_policy: DashMap::new(),
            default: Some(answer.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            by_policy: DashMap::new(),
            default: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn on(self, policy: &str, answer: Option<&str>) -> Self {
        self.by_policy
            .insert(policy.to_string(), answer.map(String::from));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn calls_with(&self, policy: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| policy_of(r) == policy)
            .count()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

/// System prompt of a text request, leading text part of an image request.
fn policy_of(request: &CompletionRequest) -> String {
    match request.messages.first().map(|m| &m.content) {
        Some(AiContent::Text(text)) => text.clone(),
        Some(AiContent::Parts(parts)) => parts
            .iter()
            .find_map(|p| match p {
                ContentPart::Text { text } => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_default(),
        None => String::new(),
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.requests.lock().push(request.clone());
        let policy = policy_of(request);
        let answer = match self.by_policy.get(&policy) {
            Some(a) => a.clone(),
            None => self.default.clone(),
        };
        answer.ok_or(AiError::Status {
            status: 503,
            body: "unavailable".into(),
        })
    }
}

pub fn sender(id: u64) -> Sender {
    Sender {
        id,
        first_name: "Test".into(),
        last_name: None,
    }
}

/// Plain text message; tests adjust the remaining fields with struct update syntax.
pub fn text_message(chat_id: i64, message_id: i32, sender: Sender, text: &str) -> InboundMessage {
    InboundMessage {
        chat_id,
        message_id,
        sender,
        text: Some(text.to_string()),
        caption: None,
        has_contact: false,
        has_photo: false,
        photo: None,
        has_link_entity: false,
        is_forward: false,
        reply: None,
        quote: None,
        external: None,
    }
}

pub fn group_text(user_id: u64, text: &str) -> InboundMessage {
    text_message(-1001, 77, sender(user_id), text)
}

pub fn build_engine(
    platform: Arc<MockPlatform>,
    provider: Arc<MockProvider>,
    random: Arc<dyn RandomSource>,
) -> ModerationEngine {
    let cache = TypedCache::new("linked_chats", CacheConfig::linked_chats());
    let utc8 = FixedOffset::east_opt(8 * 3600).unwrap();
    ModerationEngine::assemble(platform, provider, random, cache, utc8)
}
