//! Counting game integrity checks.
//!
//! Players count upward in binary in the counting channel. When the message
//! holding the current number is deleted or edited away, the bot reposts the
//! number so the game can continue.

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    data::counting::CountingChannelRepository,
    error::AppError,
    model::message::MessageSnapshot,
    service::{
        binary::to_binary,
        platform::{delete_message_after, GuildPlatform},
    },
};

pub const DELETED_NOTICE: &str = "Current number was deleted.\n";
pub const EDITED_NOTICE: &str = "Current number was edited.\n";

/// Whether a deleted message carried the current number.
///
/// The number must appear in the content and also stand on its own as a
/// whitespace-delimited token, so `1010` does not count as a deleted `101`.
pub fn deletion_needs_repost(content: &str, binary: &str) -> bool {
    content.contains(binary) && content.split_whitespace().any(|token| token == binary)
}

/// Whether an edit removed the current number from the message.
pub fn edit_needs_repost(content: &str, binary: &str) -> bool {
    !content.split_whitespace().any(|token| token == binary)
}

pub struct CountingGuard<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn GuildPlatform,
    config: &'a Config,
}

impl<'a> CountingGuard<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a dyn GuildPlatform,
        config: &'a Config,
    ) -> Self {
        Self { db, platform, config }
    }

    /// Reposts the current number if a deleted message held it.
    ///
    /// Messages outside the counting channel are ignored.
    ///
    /// # Returns
    /// - `Ok(true)` - The number was reposted
    /// - `Ok(false)` - Nothing to restore
    /// - `Err(AppError)` - Reading the counter or sending failed
    pub async fn on_deleted(&self, message: &MessageSnapshot) -> Result<bool, AppError> {
        if message.channel_id != self.config.counting_channel_id {
            return Ok(false);
        }

        let Some(binary) = self.current_binary().await? else {
            return Ok(false);
        };

        tracing::debug!(
            "Counting message {} deleted, current number {}",
            message.id,
            binary
        );

        if !deletion_needs_repost(&message.content, &binary) {
            return Ok(false);
        }

        self.repost(message.channel_id, DELETED_NOTICE, &binary).await?;
        Ok(true)
    }

    /// Reposts the current number if an edit to the latest message removed it.
    ///
    /// Only the most recent message of the counting channel is checked; edits to
    /// older messages are ignored.
    ///
    /// # Returns
    /// - `Ok(true)` - The number was reposted
    /// - `Ok(false)` - Nothing to restore
    /// - `Err(AppError)` - Fetching history, reading the counter or sending failed
    pub async fn on_edited(&self, after: &MessageSnapshot) -> Result<bool, AppError> {
        if after.channel_id != self.config.counting_channel_id {
            return Ok(false);
        }

        let latest = self.platform.latest_message_id(after.channel_id).await?;
        if latest != Some(after.id) {
            tracing::debug!(
                "Edited counting message {} is not the latest ({:?})",
                after.id,
                latest
            );
            return Ok(false);
        }

        let Some(binary) = self.current_binary().await? else {
            return Ok(false);
        };

        if !edit_needs_repost(&after.content, &binary) {
            return Ok(false);
        }

        self.repost(after.channel_id, EDITED_NOTICE, &binary).await?;
        Ok(true)
    }

    async fn current_binary(&self) -> Result<Option<String>, AppError> {
        let repo = CountingChannelRepository::new(self.db);

        match repo.get_current_number().await? {
            Some(number) => Ok(Some(to_binary(number))),
            None => {
                tracing::warn!("Counting table has no counter row");
                Ok(None)
            }
        }
    }

    async fn repost(&self, channel_id: u64, notice: &str, binary: &str) -> Result<(), AppError> {
        let notice_id = self.platform.send_text(channel_id, notice).await?;
        self.platform.send_text(channel_id, binary).await?;

        tracing::info!("Reposted counting number {} in channel {}", binary, channel_id);

        if let Some(ttl) = self.config.counting_notice_ttl {
            delete_message_after(self.platform, channel_id, notice_id, ttl).await?;
        }

        Ok(())
    }
}
