//! Group message events.

pub mod moderation;

use chrono::Utc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::debug;

use crate::bot::dispatcher::AppState;
use crate::bot::inbound::to_inbound;

fn is_group(msg: &Message) -> bool {
    msg.chat.is_group() || msg.chat.is_supergroup()
}

/// Serves both new and edited messages; an edit is rescanned like a new message.
pub fn message_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message| is_group(&msg)).endpoint(on_message)
}

async fn on_message(msg: Message, state: AppState) -> anyhow::Result<()> {
    let Some(inbound) = to_inbound(&msg) else {
        debug!("Skipping message {} in {}: not sent by a member", msg.id.0, msg.chat.id);
        return Ok(());
    };
    moderation::moderate(&state, &inbound, Utc::now()).await;
    Ok(())
}
