//! Telegram side: dispatcher, update conversion and the platform adapter.

pub mod dispatcher;
pub mod inbound;
pub mod platform;
mod runtime;
mod webhook;

pub use dispatcher::{build_dispatcher, AppState};
pub use platform::TelegramPlatform;
pub use runtime::run;
