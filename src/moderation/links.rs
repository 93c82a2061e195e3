//! Enrichment for in-platform channel and group links.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::ports::{ChatInfo, ChatPlatform};
use crate::cache::TypedCache;

static TG_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:t\.me|telegram\.me)/([a-zA-Z0-9_]{5,})").expect("valid link regex")
});

/// First linked handle in `text`.
pub fn extract_handle(text: &str) -> Option<&str> {
    TG_LINK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[derive(Clone)]
pub struct LinkResolver {
    platform: Arc<dyn ChatPlatform>,
    cache: TypedCache<String, ChatInfo>,
}

impl LinkResolver {
    pub fn new(platform: Arc<dyn ChatPlatform>, cache: TypedCache<String, ChatInfo>) -> Self {
        Self { platform, cache }
    }

    /// Metadata of the first linked chat. Lookup failures yield `None` and are not cached.
    pub async fn resolve(&self, text: &str) -> Option<ChatInfo> {
        let handle = extract_handle(text)?.to_lowercase();

        if let Some(info) = self.cache.get(&handle) {
            debug!("Linked chat @{} served from cache", handle);
            return Some(info);
        }

        match self.platform.get_chat_info(&handle).await {
            Ok(info) => {
                debug!("Linked chat @{} resolved", handle);
                self.cache.insert(handle, info.clone());
                Some(info)
            }
            Err(e) => {
                warn!("Could not resolve linked chat @{}: {}", handle, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::moderation::testing::{MockPlatform, PlatformCall};

    fn resolver(platform: Arc<MockPlatform>) -> LinkResolver {
        LinkResolver::new(platform, TypedCache::new("linked_chats", CacheConfig::linked_chats()))
    }

    #[test]
    fn handle_extraction() {
        assert_eq!(extract_handle("join t.me/cheap_usdt now"), Some("cheap_usdt"));
        assert_eq!(extract_handle("https://telegram.me/abcde"), Some("abcde"));
        assert_eq!(extract_handle("t.me/abcd"), None);
        assert_eq!(extract_handle("no links"), None);
    }

    #[tokio::test]
    async fn success_is_cached_failure_is_not() {
        let platform = Arc::new(MockPlatform::default());
        platform.chats.insert(
            "goodchan".into(),
            ChatInfo {
                title: Some("Good".into()),
                description: None,
            },
        );
        let resolver = resolver(platform.clone());

        assert!(resolver.resolve("t.me/GoodChan").await.is_some());
        assert!(resolver.resolve("t.me/goodchan").await.is_some());
        assert!(resolver.resolve("t.me/missing").await.is_none());
        assert!(resolver.resolve("t.me/missing").await.is_none());

        let lookups = |h: &str| platform.count(|c| *c == PlatformCall::ChatInfo(h.into()));
        assert_eq!(lookups("goodchan"), 1);
        assert_eq!(lookups("missing"), 2);
    }
}
