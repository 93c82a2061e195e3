//! Cache sizing and expiry.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_capacity: u64,
    /// Expiry after insertion.
    pub ttl: Option<Duration>,
    /// Expiry after last read.
    pub tti: Option<Duration>,
}

impl CacheConfig {
    /// Bounded cache without expiry.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ttl: None,
            tti: None,
        }
    }

    #[must_use]
    pub fn ttl(self, ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..self
        }
    }

    #[must_use]
    pub fn tti(self, tti: Duration) -> Self {
        Self {
            tti: Some(tti),
            ..self
        }
    }

    /// Public channel/group metadata behind `t.me` links.
    /// Spam bursts reuse the same few links and titles rarely change.
    pub fn linked_chats() -> Self {
        Self::with_capacity(2_000)
            .ttl(Duration::from_secs(30 * 60))
            .tti(Duration::from_secs(10 * 60))
    }
}
