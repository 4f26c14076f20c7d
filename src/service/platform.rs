//! Chat platform command interface used by the services.
//!
//! The bot runtime implements this over Serenity's HTTP client and cache
//! (`bot::platform::SerenityPlatform`). Every call is a single external request;
//! nothing here retries.

use serenity::async_trait;
use std::time::Duration;

use crate::{
    error::AppError,
    model::{guild::GuildSnapshot, record::AuditRecord},
};

#[async_trait]
pub trait GuildPlatform: Send + Sync {
    /// User id of the bot itself.
    fn current_user_id(&self) -> u64;

    /// Sends a plain text message and returns its id.
    async fn send_text(&self, channel_id: u64, content: &str) -> Result<u64, AppError>;

    /// Sends an audit record as an embed.
    async fn send_record(&self, channel_id: u64, record: &AuditRecord) -> Result<(), AppError>;

    /// Sends a direct message to a user.
    async fn send_direct_message(&self, user_id: u64, content: &str) -> Result<(), AppError>;

    /// Deletes a message. A message that no longer exists yields a not-found error.
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError>;

    /// Name of a guild channel, or None when the channel cannot be resolved.
    async fn channel_name(&self, channel_id: u64) -> Result<Option<String>, AppError>;

    /// Id of the most recent message in a channel.
    async fn latest_message_id(&self, channel_id: u64) -> Result<Option<u64>, AppError>;

    /// Fetches members, roles and categories of a guild.
    async fn guild_snapshot(&self, guild_id: u64) -> Result<GuildSnapshot, AppError>;

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    /// Creates a voice channel under `category_id` that the base role cannot join.
    async fn create_locked_voice_channel(
        &self,
        guild_id: u64,
        category_id: u64,
        name: &str,
    ) -> Result<u64, AppError>;

    async fn set_role_position(
        &self,
        guild_id: u64,
        role_id: u64,
        position: u16,
    ) -> Result<(), AppError>;
}

/// Deletes a message after `delay`, ignoring messages that are already gone.
///
/// # Returns
/// - `Ok(true)` - The message was deleted
/// - `Ok(false)` - The message no longer existed
/// - `Err(AppError)` - Any other failure
pub async fn delete_message_after(
    platform: &dyn GuildPlatform,
    channel_id: u64,
    message_id: u64,
    delay: Duration,
) -> Result<bool, AppError> {
    tokio::time::sleep(delay).await;

    match platform.delete_message(channel_id, message_id).await {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => {
            tracing::debug!(
                "Message {} in channel {} was already deleted",
                message_id,
                channel_id
            );
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
