//! Spamwarden - Telegram group anti-spam bot
//!
//! Deletes and restricts advertising in activated groups using hard keyword
//! rules, an AI classifier over text, images and sender profiles, and a
//! trust system that stops scanning users with a clean history.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - MongoDB (or in-memory) group and user state
//! - `cache` - Named Moka caches
//! - `ai` - Chat-completion client
//! - `moderation` - Decision engine and enforcement
//! - `permissions` - Configured admin IDs
//! - `bot` - Dispatcher, runtime and Telegram adapter (with Throttle)
//! - `plugins` - Admin commands
//! - `events` - Group message moderation
//! - `utils` - Background tasks and helpers

mod ai;
mod bot;
mod cache;
mod config;
mod database;
mod events;
mod moderation;
mod permissions;
mod plugins;
mod utils;

use std::sync::Arc;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ai::ChatCompletionClient;
use bot::{AppState, TelegramPlatform};
use cache::{CacheConfig, TypedCache};
use config::Config;
use database::{Database, MemoryStore, MongoStore, Store};
use moderation::{EnforcementAction, EntropyRandom, ModerationEngine};
use permissions::Permissions;
use utils::BackgroundTasks;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spamwarden=info,teloxide=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Spamwarden...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!("Bot mode: {:?}", config.bot_mode);

    let store: Arc<dyn Store> = match &config.mongodb_uri {
        Some(uri) => {
            info!("Connecting to MongoDB...");
            let db = Database::connect(uri, &config.mongodb_database).await?;
            info!("Database connected");
            Arc::new(MongoStore::init(&db).await?)
        }
        None => {
            warn!("MONGODB_URI not set, state is kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // Throttle keeps us inside Telegram's global and per-chat send limits
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    let me = bot.get_me().await?;
    info!("Bot username: @{}", me.username());

    let permissions = Permissions::new(config.admin_ids.iter().copied());
    if permissions.is_empty() {
        warn!("ADMIN_IDS is empty, nobody can run admin commands");
    } else {
        info!("Admins: {:?}", config.admin_ids);
    }

    let ai = ChatCompletionClient::new(&config.ai);
    if !ai.is_configured() {
        warn!("AI_API_URL/AI_API_KEY not set, classifier stages will pass everything");
    }

    let linked_chats = TypedCache::new("linked_chats", CacheConfig::linked_chats());

    let platform = Arc::new(TelegramPlatform::new(bot.clone()));
    let tasks = BackgroundTasks::new();

    let engine = ModerationEngine::assemble(
        platform.clone(),
        Arc::new(ai),
        Arc::new(EntropyRandom),
        linked_chats,
        config.tz_offset,
    );

    let state = AppState {
        store,
        engine,
        enforcement: EnforcementAction::new(platform.clone(), tasks.clone()),
        platform,
        permissions,
    };

    let dispatcher = bot::build_dispatcher(bot.clone(), state);
    bot::run(&config, bot, dispatcher).await?;

    // Let pending notice deletions finish before exiting
    info!("Waiting for {} background task(s)", tasks.len());
    tasks.drain().await;

    Ok(())
}
