use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

/// Roles never moved by the role ranker.
const DEFAULT_ROLE_DENYLIST: &[&str] = &[
    "Admin",
    "GiveawayBot",
    "Bots",
    "Mod",
    "dabBot",
    "Simple Poll",
    "Groovy",
];

/// Command prefixes whose messages are deleted by other bots and not logged.
const DEFAULT_AUTO_DELETE_COMMANDS: &[&str] = &["!LEAVE", "!JOIN", "!ADD"];

const DEFAULT_ROLE_UPDATE_DELAY_MS: u64 = 1000;
const DEFAULT_MESSAGE_CACHE_SIZE: usize = 1000;

/// Immutable bot configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Creates the counting table when absent. Off against the shared database.
    pub run_migrations: bool,
    pub discord_bot_token: String,

    /// Staff channel receiving every audit record.
    pub log_channel_id: u64,
    pub guild_id: u64,
    /// Channel linked from the welcome DM for joining classes.
    pub class_sub_channel_id: u64,
    /// Channel linked from the welcome DM for bot commands.
    pub bot_channel_id: u64,
    pub counting_channel_id: u64,

    pub role_denylist: Vec<String>,
    pub auto_delete_commands: Vec<String>,
    /// Pause between consecutive role position updates.
    pub role_update_delay: Duration,
    /// When set, counting repost notices are deleted after this delay.
    pub counting_notice_ttl: Option<Duration>,
    pub message_cache_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable, or None when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError)` - A required variable is missing or a value fails to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource { lookup };

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            run_migrations: env.flag("RUN_MIGRATIONS")?,
            discord_bot_token: env.required("DISCORD_BOT_TOKEN")?,
            log_channel_id: env.required_id("LOG_CHANNEL")?,
            guild_id: env.required_id("GUILD_ID")?,
            class_sub_channel_id: env.required_id("CLASS_SUB_CHANNEL")?,
            bot_channel_id: env.required_id("BOT_CHANNEL")?,
            counting_channel_id: env.required_id("COUNTING_CHANNEL")?,
            role_denylist: env.list("ROLE_DENYLIST", DEFAULT_ROLE_DENYLIST),
            auto_delete_commands: env.list("AUTO_DELETE_COMMANDS", DEFAULT_AUTO_DELETE_COMMANDS),
            role_update_delay: Duration::from_millis(
                env.optional_number("ROLE_UPDATE_DELAY_MS")?
                    .unwrap_or(DEFAULT_ROLE_UPDATE_DELAY_MS),
            ),
            counting_notice_ttl: env
                .optional_number("COUNTING_NOTICE_TTL_SECS")?
                .map(Duration::from_secs),
            message_cache_size: env
                .optional_number("MESSAGE_CACHE_SIZE")?
                .map(|size| size as usize)
                .unwrap_or(DEFAULT_MESSAGE_CACHE_SIZE),
        })
    }
}

struct EnvSource<F> {
    lookup: F,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn required_id(&self, name: &str) -> Result<u64, ConfigError> {
        let value = self.required(name)?;
        parse_number(name, value)
    }

    fn optional_number(&self, name: &str) -> Result<Option<u64>, ConfigError> {
        self.get(name)
            .map(|value| parse_number(name, value))
            .transpose()
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        match self.get(name) {
            None => Ok(false),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    reason: "expected true or false".to_string(),
                    value,
                }),
            },
        }
    }

    fn list(&self, name: &str, default: &[&str]) -> Vec<String> {
        match self.get(name) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            None => default.iter().map(|item| item.to_string()).collect(),
        }
    }
}

fn parse_number(name: &str, value: String) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
            value,
        })
}
