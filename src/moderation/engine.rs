//! Per-message decision.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info};

use super::classifier::ContentClassifier;
use super::links::LinkResolver;
use super::message::InboundMessage;
use super::night::{is_silenced, local_hour};
use super::pipeline::ScanPipeline;
use super::ports::{ChatInfo, ChatPlatform};
use super::profile::ProfileAuditor;
use super::trust::{RandomSource, TrustStateMachine};
use super::verdict::Violation;
use crate::ai::CompletionProvider;
use crate::cache::TypedCache;
use crate::database::{GroupConfig, StateUpdate, UserState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Allow,
    /// Delete without sanction (night mode).
    Silence,
    Block(Violation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub state_update: Option<StateUpdate>,
}

impl Decision {
    fn allow() -> Self {
        Self {
            action: Action::Allow,
            state_update: None,
        }
    }
}

#[derive(Clone)]
pub struct ModerationEngine {
    trust: TrustStateMachine,
    pipeline: ScanPipeline,
    tz_offset: FixedOffset,
}

impl ModerationEngine {
    pub fn new(trust: TrustStateMachine, pipeline: ScanPipeline, tz_offset: FixedOffset) -> Self {
        Self {
            trust,
            pipeline,
            tz_offset,
        }
    }

    /// Wire the stages over the given collaborators.
    pub fn assemble(
        platform: Arc<dyn ChatPlatform>,
        provider: Arc<dyn CompletionProvider>,
        random: Arc<dyn RandomSource>,
        link_cache: TypedCache<String, ChatInfo>,
        tz_offset: FixedOffset,
    ) -> Self {
        let classifier = ContentClassifier::new(provider, platform.clone());
        let profile = ProfileAuditor::new(platform.clone(), classifier.clone());
        let links = LinkResolver::new(platform, link_cache);

        Self::new(
            TrustStateMachine::new(random),
            ScanPipeline::new(profile, links, classifier),
            tz_offset,
        )
    }

    /// Decisions that need no user state. `None` means the message goes on to
    /// the trust check and scan.
    pub fn pre_scan(
        &self,
        message: &InboundMessage,
        sender_is_admin: bool,
        group: Option<&GroupConfig>,
        now: DateTime<Utc>,
    ) -> Option<Decision> {
        if sender_is_admin {
            debug!("Admin {} exempt", message.sender.id);
            return Some(Decision::allow());
        }

        let Some(group) = group else {
            debug!("Chat {} not activated", message.chat_id);
            return Some(Decision::allow());
        };

        if message.has_contact {
            info!("Contact card from {} in {}", message.sender.id, message.chat_id);
            return Some(Decision {
                action: Action::Block(Violation::ContactCard),
                state_update: None,
            });
        }

        let hour = local_hour(now, &self.tz_offset);
        if is_silenced(group.night_mode, hour) {
            debug!("Night silence in {} ({}:00)", message.chat_id, hour);
            return Some(Decision {
                action: Action::Silence,
                state_update: None,
            });
        }

        None
    }

    pub async fn decide(
        &self,
        message: &InboundMessage,
        sender_is_admin: bool,
        group: Option<&GroupConfig>,
        user_state: &UserState,
        now: DateTime<Utc>,
    ) -> Decision {
        if let Some(decision) = self.pre_scan(message, sender_is_admin, group, now) {
            return decision;
        }

        if self.trust.should_skip_scan(user_state, message) {
            debug!(
                "Trusted {} skips scan (count {})",
                user_state.user_id, user_state.message_count
            );
            return Decision {
                action: Action::Allow,
                state_update: Some(TrustStateMachine::on_skipped(user_state)),
            };
        }

        let report = self.pipeline.scan(message, user_state).await;
        let audited = report.profile_audited.then(|| StateUpdate {
            profile_checked: Some(true),
            ..Default::default()
        });

        if report.verdict.violated
            && let Some(violation) = report.verdict.first()
        {
            return Decision {
                action: Action::Block(violation.clone()),
                state_update: audited,
            };
        }

        let update = TrustStateMachine::on_clean(user_state);
        if update.trusted == Some(true) {
            info!(
                "User {} promoted to trusted after {} messages",
                user_state.user_id,
                update.message_count.unwrap_or_default()
            );
        }

        Decision {
            action: Action::Allow,
            state_update: Some(audited.unwrap_or_default().merge(update)),
        }
    }
}
