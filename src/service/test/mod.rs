//! Shared fixtures for service tests.

use chrono::{TimeZone, Utc};

use crate::{
    config::Config,
    model::{member::MemberSnapshot, message::MessageSnapshot},
};


mod router;

pub const GUILD: u64 = 1;
pub const LOG_CHANNEL: u64 = 10;
pub const CLASS_SUB_CHANNEL: u64 = 30;
pub const BOT_CHANNEL: u64 = 40;
pub const COUNTING: u64 = 50;

/// Configuration with fixed channel ids and no role update delay.
pub fn test_config() -> Config {
    let mut config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DISCORD_BOT_TOKEN" => Some("token".to_string()),
        "LOG_CHANNEL" => Some(LOG_CHANNEL.to_string()),
        "GUILD_ID" => Some(GUILD.to_string()),
        "CLASS_SUB_CHANNEL" => Some(CLASS_SUB_CHANNEL.to_string()),
        "BOT_CHANNEL" => Some(BOT_CHANNEL.to_string()),
        "COUNTING_CHANNEL" => Some(COUNTING.to_string()),
        _ => None,
    })
    .expect("test configuration is complete");
    config.role_update_delay = std::time::Duration::ZERO;
    config
}

pub fn member(id: u64, name: &str) -> MemberSnapshot {
    MemberSnapshot {
        id,
        name: name.to_string(),
        tag: format!("{}#0001", name),
        avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
        bot: false,
        nickname: None,
        role_names: vec!["CMPSC 131".to_string(), "MATH 141".to_string()],
        joined_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()),
        created_at: Utc.with_ymd_and_hms(2020, 6, 1, 8, 30, 0).unwrap(),
    }
}

pub fn message(id: u64, channel_id: u64, content: &str) -> MessageSnapshot {
    MessageSnapshot {
        id,
        channel_id,
        guild_id: Some(GUILD),
        author: member(77, "carol"),
        content: content.to_string(),
    }
}
