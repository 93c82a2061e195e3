//! Ordered content scan. The first stage that finds a violation ends the scan.

use tracing::{debug, info};

use super::classifier::{ContentClassifier, TEXT_POLICY};
use super::context::ScanContext;
use super::keywords::find_hard_keyword;
use super::links::LinkResolver;
use super::message::InboundMessage;
use super::profile::ProfileAuditor;
use super::verdict::{Verdict, Violation};
use crate::database::UserState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub verdict: Verdict,
    /// The one-time profile audit ran during this scan.
    pub profile_audited: bool,
}

#[derive(Clone)]
pub struct ScanPipeline {
    profile: ProfileAuditor,
    links: LinkResolver,
    classifier: ContentClassifier,
}

impl ScanPipeline {
    pub fn new(profile: ProfileAuditor, links: LinkResolver, classifier: ContentClassifier) -> Self {
        Self {
            profile,
            links,
            classifier,
        }
    }

    pub async fn scan(&self, message: &InboundMessage, state: &UserState) -> ScanReport {
        let mut ctx = ScanContext::build(message);
        debug!(
            "Scanning message {} from {} ({} chars)",
            message.message_id,
            message.sender.id,
            ctx.text.chars().count()
        );

        let mut profile_audited = false;
        let hit = self
            .first_violation(message, state, &mut ctx, &mut profile_audited)
            .await;

        if let Some(v) = &hit {
            info!("Message {} from {} violates: {}", message.message_id, message.sender.id, v);
        }

        ScanReport {
            verdict: hit.into(),
            profile_audited,
        }
    }

    async fn first_violation(
        &self,
        message: &InboundMessage,
        state: &UserState,
        ctx: &mut ScanContext,
        profile_audited: &mut bool,
    ) -> Option<Violation> {
        if let Some(term) = find_hard_keyword(&ctx.text) {
            return Some(Violation::HardKeyword(term));
        }

        if !state.profile_checked {
            *profile_audited = true;
            if let Some(v) = self.profile.audit(&message.sender).await {
                return Some(v);
            }
        }

        if let Some(info) = self.links.resolve(&ctx.text).await {
            ctx.append_linked_chat(&info);
        }

        if !ctx.is_trivial() && self.classifier.classify_text(&ctx.text, TEXT_POLICY).await {
            return Some(Violation::TextContent);
        }

        if let Some(image) = &ctx.image
            && self.classifier.classify_image(image).await
        {
            return Some(Violation::ImageContent);
        }

        None
    }
}
