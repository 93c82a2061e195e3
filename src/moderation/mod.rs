//! Moderation decision core.
//!
//! Decides per message whether to allow it, silently drop it (night mode)
//! or block the sender, and carries out the block. Talks to the outside
//! world only through [`ChatPlatform`], [`CompletionProvider`] and the
//! values the caller loads from storage.
//!
//! [`CompletionProvider`]: crate::ai::CompletionProvider

mod classifier;
mod context;
mod engine;
mod enforcement;
mod keywords;
mod links;
pub mod message;
mod night;
mod pipeline;
mod ports;
mod profile;
mod trust;
mod verdict;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{Action, Decision, ModerationEngine};
pub use enforcement::EnforcementAction;
pub use message::InboundMessage;
pub use ports::{ChatInfo, ChatPlatform, ImageRef, PlatformError};
pub use trust::EntropyRandom;
