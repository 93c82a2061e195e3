//! Configuration module for Spamwarden.
//!
//! Loads configuration from environment variables.

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::env;
use tracing::warn;

/// UTC+8, the zone the bot was first run in.
const DEFAULT_TZ_HOURS: i32 = 8;

/// Bot running mode
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Chat-completion endpoint settings. Either field missing disables the classifier.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub vision_model: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// Users allowed to run admin commands and exempt from moderation
    pub admin_ids: Vec<u64>,

    // MongoDB (in-memory store when the URI is absent)
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,

    pub ai: AiSettings,

    /// Night mode timezone
    pub tz_offset: FixedOffset,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if `BOT_TOKEN` is not set, or webhook mode is selected without `WEBHOOK_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bot_mode = match non_empty("BOT_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "webhook" => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = non_empty("WEBHOOK_URL");
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            panic!("WEBHOOK_URL must be set when BOT_MODE is webhook");
        }

        let model = non_empty("AI_MODEL").unwrap_or_else(|| "gpt-4".to_string());
        let vision_model = non_empty("AI_VISION_MODEL")
            .or_else(|| non_empty("AI_MODEL"))
            .unwrap_or_else(|| "gpt-4-vision".to_string());

        Self {
            bot_token: env::var("BOT_TOKEN").expect("BOT_TOKEN must be set"),
            bot_mode,
            webhook_url,
            webhook_port: non_empty("WEBHOOK_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            webhook_secret: non_empty("WEBHOOK_SECRET"),
            admin_ids: parse_id_list(&env::var("ADMIN_IDS").unwrap_or_default()),
            mongodb_uri: non_empty("MONGODB_URI"),
            mongodb_database: non_empty("MONGODB_DATABASE")
                .unwrap_or_else(|| "spamwarden".to_string()),
            ai: AiSettings {
                api_url: non_empty("AI_API_URL"),
                api_key: non_empty("AI_API_KEY"),
                model,
                vision_model,
            },
            tz_offset: tz_offset_from_env(),
        }
    }
}

fn default_tz_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_TZ_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

fn tz_offset_from_env() -> FixedOffset {
    let Some(raw) = non_empty("TZ_OFFSET") else {
        return default_tz_offset();
    };
    parse_tz_offset(&raw).unwrap_or_else(|| {
        warn!("TZ_OFFSET={:?} is not a UTC offset in -12..=14 hours, using +{}", raw, DEFAULT_TZ_HOURS);
        default_tz_offset()
    })
}

/// Hours east of UTC: whole (`8`), fractional (`5.5`) or `H:MM` (`5:30`, `-3:30`).
fn parse_tz_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    let minutes = match raw.split_once(':') {
        Some((hours, mins)) => {
            let hours = hours.trim();
            let h: i32 = hours.parse().ok()?;
            let m: i32 = mins.trim().parse().ok()?;
            if !(0..60).contains(&m) {
                return None;
            }
            let sign = if hours.starts_with('-') { -1 } else { 1 };
            h * 60 + sign * m
        }
        None => {
            let hours: f64 = raw.parse().ok()?;
            if !hours.is_finite() {
                return None;
            }
            (hours * 60.0).round() as i32
        }
    };

    if !(-12 * 60..=14 * 60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated user ids; invalid entries are skipped.
fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|s| s.trim().parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_skips_garbage() {
        assert_eq!(parse_id_list("1, 2,abc,,3 "), vec![1, 2, 3]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn tz_offset_accepts_fractional_hours() {
        let east = |secs| FixedOffset::east_opt(secs).unwrap();
        assert_eq!(parse_tz_offset("8"), Some(east(8 * 3600)));
        assert_eq!(parse_tz_offset("5.5"), Some(east(5 * 3600 + 1800)));
        assert_eq!(parse_tz_offset(" 5:30 "), Some(east(5 * 3600 + 1800)));
        assert_eq!(parse_tz_offset("5.75"), Some(east(5 * 3600 + 2700)));
        assert_eq!(parse_tz_offset("-3.5"), Some(east(-(3 * 3600 + 1800))));
        assert_eq!(parse_tz_offset("-0:30"), Some(east(-1800)));
    }

    #[test]
    fn tz_offset_rejects_garbage() {
        for raw in ["15", "-13", "abc", "5:75", "NaN", "inf", ""] {
            assert_eq!(parse_tz_offset(raw), None, "{raw}");
        }
        assert_eq!(default_tz_offset().local_minus_utc(), 8 * 3600);
    }
}
