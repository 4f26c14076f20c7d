//! Member count voice channel.
//!
//! The guild shows its human member count as the name of a locked voice channel
//! inside the "server stats" category. The channel is deleted and recreated on
//! every refresh, never renamed.

use crate::{
    error::AppError,
    model::guild::GuildSnapshot,
    service::platform::GuildPlatform,
};

/// Substring identifying the stats category, matched case-insensitively.
pub const STATS_CATEGORY_NAME: &str = "server stats";

pub struct MemberCountService<'a> {
    platform: &'a dyn GuildPlatform,
}

impl<'a> MemberCountService<'a> {
    pub fn new(platform: &'a dyn GuildPlatform) -> Self {
        Self { platform }
    }

    /// Republishes the non-bot member count.
    ///
    /// Deletes the first channel of the stats category and creates a voice channel
    /// named `Total Members: <count>` in its place. A category with no channels
    /// only gets the new channel. Does nothing when no stats category exists.
    ///
    /// # Returns
    /// - `Ok(Some(count))` - Count published
    /// - `Ok(None)` - Guild has no stats category
    /// - `Err(AppError)` - Deleting or creating the channel failed
    pub async fn refresh(&self, guild: &GuildSnapshot) -> Result<Option<u64>, AppError> {
        let Some(category) = guild.find_category(STATS_CATEGORY_NAME) else {
            tracing::debug!(
                "Guild {} has no '{}' category, skipping member count",
                guild.id,
                STATS_CATEGORY_NAME
            );
            return Ok(None);
        };

        let count = guild.human_member_count();

        if let Some(&channel_id) = category.channel_ids.first() {
            match self.platform.delete_channel(channel_id).await {
                Ok(()) => {}
                // Another refresh got there first
                Err(e) if e.is_not_found() => {
                    tracing::debug!("Member count channel {} already deleted", channel_id)
                }
                Err(e) => return Err(e),
            }
        }

        self.platform
            .create_locked_voice_channel(guild.id, category.id, &member_count_label(count))
            .await?;

        tracing::info!("Updated member count channel for guild {} to {}", guild.id, count);

        Ok(Some(count))
    }
}

pub fn member_count_label(count: u64) -> String {
    format!("Total Members: {}", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::guild::{CategorySnapshot, GuildMemberEntry};
    use crate::service::test::platform::{Call, RecordingPlatform};

    fn guild(categories: Vec<CategorySnapshot>) -> GuildSnapshot {
        GuildSnapshot {
            id: 1,
            name: "PSU".to_string(),
            members: vec![
                GuildMemberEntry {
                    id: 10,
                    bot: false,
                    role_ids: vec![],
                },
                GuildMemberEntry {
                    id: 11,
                    bot: true,
                    role_ids: vec![],
                },
                GuildMemberEntry {
                    id: 12,
                    bot: false,
                    role_ids: vec![],
                },
            ],
            roles: Vec::new(),
            categories,
        }
    }

    fn stats_category(channel_ids: Vec<u64>) -> CategorySnapshot {
        CategorySnapshot {
            id: 50,
            name: "SERVER STATS".to_string(),
            channel_ids,
        }
    }

    /// Tests replacing the stats channel with an up to date count.
    ///
    /// Expected: first channel deleted, locked voice channel created with 2 members
    #[tokio::test]
    async fn replaces_first_stats_channel() -> Result<(), AppError> {
        let platform = RecordingPlatform::new();
        let guild = guild(vec![stats_category(vec![60, 61])]);

        let count = MemberCountService::new(&platform).refresh(&guild).await?;

        assert_eq!(count, Some(2));
        assert_eq!(
            platform.calls(),
            vec![
                Call::DeleteChannel { channel_id: 60 },
                Call::CreateVoiceChannel {
                    guild_id: 1,
                    category_id: 50,
                    name: "Total Members: 2".to_string(),
                },
            ]
        );

        Ok(())
    }

    /// Tests that a missing stats category is silently skipped.
    #[tokio::test]
    async fn skips_guild_without_stats_category() -> Result<(), AppError> {
        let platform = RecordingPlatform::new();
        let guild = guild(vec![CategorySnapshot {
            id: 51,
            name: "Classes".to_string(),
            channel_ids: vec![70],
        }]);

        let count = MemberCountService::new(&platform).refresh(&guild).await?;

        assert_eq!(count, None);
        assert!(platform.calls().is_empty());

        Ok(())
    }

    /// Tests refreshing an empty stats category.
    ///
    /// Expected: channel created without a preceding delete
    #[tokio::test]
    async fn creates_channel_in_empty_category() -> Result<(), AppError> {
        let platform = RecordingPlatform::new();
        let guild = guild(vec![stats_category(vec![])]);

        MemberCountService::new(&platform).refresh(&guild).await?;

        assert_eq!(platform.calls().len(), 1);
        assert!(matches!(platform.calls()[0], Call::CreateVoiceChannel { .. }));

        Ok(())
    }

    /// Tests that a stats channel deleted concurrently does not stop the refresh.
    #[tokio::test]
    async fn tolerates_already_deleted_channel() -> Result<(), AppError> {
        let platform = RecordingPlatform::new().with_missing_channel(60);
        let guild = guild(vec![stats_category(vec![60])]);

        let count = MemberCountService::new(&platform).refresh(&guild).await?;

        assert_eq!(count, Some(2));
        assert!(platform
            .calls()
            .iter()
            .any(|call| matches!(call, Call::CreateVoiceChannel { .. })));

        Ok(())
    }
}
