//! Message dispatcher setup.
//!
//! Admin commands are tried first; every other group message (edits
//! included) goes through moderation.

use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::debug;

use crate::database::Store;
use crate::events;
use crate::moderation::{ChatPlatform, EnforcementAction, ModerationEngine};
use crate::permissions::Permissions;
use crate::plugins;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub engine: ModerationEngine,
    pub enforcement: EnforcementAction,
    pub platform: Arc<dyn ChatPlatform>,

    /// Exempt from moderation, allowed to run commands.
    pub permissions: Permissions,
}

/// Build the dispatcher with all handlers.
pub fn build_dispatcher(
    bot: ThrottledBot,
    state: AppState,
) -> Dispatcher<ThrottledBot, anyhow::Error, teloxide::dispatching::DefaultKey> {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            debug!("Unhandled update {}", upd.id.0);
        })
        .enable_ctrlc_handler()
        .build()
}

fn schema() -> UpdateHandler<anyhow::Error> {
    use teloxide::dispatching::UpdateFilterExt;

    let message_handler = Update::filter_message()
        .branch(plugins::command_handler())
        .branch(events::message_handler());

    // Edits are rescanned but never run as commands.
    let edited_handler = Update::filter_edited_message().branch(events::message_handler());

    dptree::entry()
        .branch(message_handler)
        .branch(edited_handler)
}
