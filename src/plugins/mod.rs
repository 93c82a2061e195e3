//! Admin commands.
//!
//! Only users listed in `ADMIN_IDS` reach [`command_handler`]'s endpoint;
//! anyone else's commands fall through to moderation like normal text.

pub mod admin;
pub mod help;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::{AppState, ThrottledBot};
use admin::{ChatKind, CommandContext};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "管理员命令:")]
pub enum Command {
    #[command(description = "显示使用说明")]
    Start,

    #[command(description = "显示使用说明")]
    Help,

    #[command(description = "激活群组防护")]
    Addgroup,

    #[command(description = "开启夜间静默")]
    Nighton,

    #[command(description = "关闭夜间静默")]
    Nightoff,

    #[command(description = "解封用户并加入白名单")]
    Unban(String),

    #[command(description = "重置用户为新用户状态")]
    Reset(String),

    #[command(description = "查看群组ID和用户ID")]
    Id,
}

pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    dptree::filter(|msg: Message, state: AppState| {
        msg.from
            .as_ref()
            .is_some_and(|user| state.permissions.is_admin(user.id.0))
    })
    .chain(teloxide::filter_command::<Command, _>())
    .endpoint(handle_command)
}

async fn handle_command(
    bot: ThrottledBot,
    msg: Message,
    cmd: Command,
    state: AppState,
) -> anyhow::Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };

    let ctx = CommandContext {
        chat_id: msg.chat.id.0,
        chat_kind: if msg.chat.is_private() {
            ChatKind::Private
        } else {
            ChatKind::Group
        },
        caller_id: from.id.0,
    };

    let reply = admin::execute(state.store.as_ref(), state.platform.as_ref(), &ctx, &cmd).await;
    if let Some(text) = reply {
        bot.send_message(msg.chat.id, text)
            .parse_mode(ParseMode::Html)
            .await?;
    }

    Ok(())
}
