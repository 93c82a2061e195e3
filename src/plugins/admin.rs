//! Admin command execution.
//!
//! Callers are already checked against `ADMIN_IDS`. Each command returns
//! the HTML reply to send, or `None` to stay silent.

use teloxide::utils::html::escape;
use tracing::{error, info, warn};

use super::help::HELP_TEXT;
use super::Command;
use crate::database::Store;
use crate::moderation::ChatPlatform;
use crate::utils::parse_user_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub chat_id: i64,
    pub chat_kind: ChatKind,
    pub caller_id: u64,
}

const GROUP_ONLY: &str = "⚠️ 请在群组中使用此命令";
const NOT_ACTIVATED: &str = "⚠️ 群组未激活，请先使用 /addgroup";

pub async fn execute(
    store: &dyn Store,
    platform: &dyn ChatPlatform,
    ctx: &CommandContext,
    command: &Command,
) -> Option<String> {
    let in_group = ctx.chat_kind == ChatKind::Group;

    match command {
        Command::Start => (!in_group).then(|| HELP_TEXT.to_string()),
        Command::Help => Some(HELP_TEXT.to_string()),

        Command::Id => Some(format!(
            "📍 Chat ID: <code>{}</code>\n👤 Your ID: <code>{}</code>",
            ctx.chat_id, ctx.caller_id
        )),

        Command::Addgroup if !in_group => Some(GROUP_ONLY.into()),
        Command::Addgroup => match store.activate_group(ctx.chat_id, ctx.caller_id).await {
            Ok(created) => {
                info!("Group {} activated by {} (new: {})", ctx.chat_id, ctx.caller_id, created);
                Some(format!("✅ 已激活群组防护\n群组ID: <code>{}</code>", ctx.chat_id))
            }
            Err(e) => {
                error!("Failed to activate {}: {}", ctx.chat_id, e);
                Some(format!("❌ 激活失败: {}", escape(&e.to_string())))
            }
        },

        Command::Nighton | Command::Nightoff if !in_group => Some(GROUP_ONLY.into()),
        Command::Nighton | Command::Nightoff => {
            let enabled = matches!(command, Command::Nighton);
            match store.set_night_mode(ctx.chat_id, enabled).await {
                Ok(true) if enabled => Some("🌙 夜间静默已开启 (22:00-09:00)".into()),
                Ok(true) => Some("☀️ 夜间静默已关闭".into()),
                Ok(false) => Some(NOT_ACTIVATED.into()),
                Err(e) => {
                    error!("Failed to toggle night mode in {}: {}", ctx.chat_id, e);
                    Some(format!("❌ 设置失败: {}", escape(&e.to_string())))
                }
            }
        }

        Command::Unban(arg) => {
            let Some(target) = parse_user_id(arg) else {
                return Some("⚠️ 用法: /unban &lt;用户ID&gt;".into());
            };
            if in_group && let Err(e) = platform.unrestrict(ctx.chat_id, target).await {
                warn!("Could not lift restriction of {} in {}: {}", target, ctx.chat_id, e);
            }
            match store.set_trust(target).await {
                Ok(()) => {
                    info!("User {} unbanned in {} by {}", target, ctx.chat_id, ctx.caller_id);
                    Some(format!("✅ 用户 <code>{target}</code> 已恢复权限并加入白名单"))
                }
                Err(e) => {
                    error!("Failed to trust {}: {}", target, e);
                    Some(format!("❌ 解封失败: {}", escape(&e.to_string())))
                }
            }
        }

        Command::Reset(arg) => {
            let Some(target) = parse_user_id(arg) else {
                return Some("⚠️ 用法: /reset &lt;用户ID&gt;".into());
            };
            match store.reset_user(target).await {
                Ok(()) => {
                    info!("User {} reset by {}", target, ctx.caller_id);
                    Some(format!(
                        "✅ 用户 <code>{target}</code> 已重置为新用户状态\n下次发言将进行完整AI审核"
                    ))
                }
                Err(e) => {
                    error!("Failed to reset {}: {}", target, e);
                    Some(format!("❌ 重置失败: {}", escape(&e.to_string())))
                }
            }
        }
    }
}
