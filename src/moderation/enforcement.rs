//! Sanction execution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::ports::ChatPlatform;
use super::verdict::Violation;
use crate::utils::BackgroundTasks;

/// Lifetime of the group notice announcing a block.
pub const NOTICE_TTL: Duration = Duration::from_secs(10);

pub fn block_notice(user_id: u64, violation: &Violation) -> String {
    format!(r#"🚫 <a href="tg://user?id={user_id}">{user_id}</a>: AI 审核为广告 ({violation})"#)
}

#[derive(Clone)]
pub struct EnforcementAction {
    platform: Arc<dyn ChatPlatform>,
    tasks: BackgroundTasks,
}

impl EnforcementAction {
    pub fn new(platform: Arc<dyn ChatPlatform>, tasks: BackgroundTasks) -> Self {
        Self { platform, tasks }
    }

    /// Restrict and delete concurrently, announce, then schedule the notice
    /// deletion. Every step is best-effort.
    pub async fn execute(&self, chat_id: i64, user_id: u64, message_id: i32, violation: &Violation) {
        let (restricted, deleted) = futures::join!(
            self.platform.restrict_send(chat_id, user_id),
            self.platform.delete_message(chat_id, message_id),
        );
        if let Err(e) = restricted {
            error!("Failed to restrict {} in {}: {}", user_id, chat_id, e);
        }
        if let Err(e) = deleted {
            error!("Failed to delete message {} in {}: {}", message_id, chat_id, e);
        }

        match self
            .platform
            .send_message(chat_id, &block_notice(user_id, violation))
            .await
        {
            Ok(notice_id) => self.expire_notice(chat_id, notice_id),
            Err(e) => error!("Failed to announce block in {}: {}", chat_id, e),
        }

        info!("Blocked {} in {} ({})", user_id, chat_id, violation);
    }

    /// Night mode: delete without sanction.
    pub async fn silence(&self, chat_id: i64, message_id: i32) {
        if let Err(e) = self.platform.delete_message(chat_id, message_id).await {
            warn!("Failed to delete message {} in {}: {}", message_id, chat_id, e);
        }
    }

    fn expire_notice(&self, chat_id: i64, notice_id: i32) {
        let platform = self.platform.clone();
        self.tasks.spawn(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            match platform.delete_message(chat_id, notice_id).await {
                Ok(()) => debug!("Block notice {} in {} removed", notice_id, chat_id),
                Err(e) => warn!("Failed to remove block notice {} in {}: {}", notice_id, chat_id, e),
            }
        });
    }
}
