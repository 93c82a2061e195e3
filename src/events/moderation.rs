//! Per-message moderation: load state, decide, persist, enforce.

use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::bot::dispatcher::AppState;
use crate::moderation::{Action, Decision, InboundMessage};

/// Storage failures let the message through; a stuck store must not turn
/// into a wave of bans.
pub async fn moderate(state: &AppState, message: &InboundMessage, now: DateTime<Utc>) -> Action {
    let is_admin = state.permissions.is_admin(message.sender.id);

    let group = if is_admin {
        None
    } else {
        match state.store.get_group_config(message.chat_id).await {
            Ok(group) => group,
            Err(e) => {
                warn!("Group config for {} unavailable: {}", message.chat_id, e);
                return Action::Allow;
            }
        }
    };

    let decision = match state.engine.pre_scan(message, is_admin, group.as_ref(), now) {
        Some(decision) => decision,
        None => {
            let user_state = match state.store.get_user_state(message.sender.id).await {
                Ok(user_state) => user_state,
                Err(e) => {
                    warn!("State for user {} unavailable: {}", message.sender.id, e);
                    return Action::Allow;
                }
            };
            state
                .engine
                .decide(message, is_admin, group.as_ref(), &user_state, now)
                .await
        }
    };

    apply(state, message, decision).await
}

async fn apply(state: &AppState, message: &InboundMessage, decision: Decision) -> Action {
    if let Some(update) = decision.state_update.as_ref().filter(|u| !u.is_empty())
        && let Err(e) = state.store.update_user_state(message.sender.id, update).await
    {
        error!("Failed to persist state of {}: {}", message.sender.id, e);
    }

    match &decision.action {
        Action::Allow => {}
        Action::Silence => {
            state
                .enforcement
                .silence(message.chat_id, message.message_id)
                .await
        }
        Action::Block(violation) => {
            state
                .enforcement
                .execute(
                    message.chat_id,
                    message.sender.id,
                    message.message_id,
                    violation,
                )
                .await
        }
    }

    decision.action
}
