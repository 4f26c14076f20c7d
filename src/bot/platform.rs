//! `GuildPlatform` backed by Serenity's HTTP client and cache.

use serenity::all::{
    Cache, Channel, ChannelId, ChannelType, CreateChannel, CreateEmbed, CreateEmbedAuthor,
    CreateMessage, GetMessages, GuildChannel, GuildId, Http, Member, MessageId,
    PermissionOverwrite, PermissionOverwriteType, Permissions, Role, RoleId, Timestamp, UserId,
};
use serenity::async_trait;
use std::sync::Arc;

use crate::{
    error::{internal::InternalError, AppError},
    model::{
        guild::{CategorySnapshot, GuildMemberEntry, GuildSnapshot, RoleSnapshot},
        record::AuditRecord,
    },
    service::platform::GuildPlatform,
};

/// Maximum page size of the guild member list endpoint.
const MEMBER_PAGE_SIZE: u64 = 1000;

pub struct SerenityPlatform {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    /// Fetches every guild member over HTTP, one page at a time.
    ///
    /// The gateway cache is incomplete until the guild has been chunked.
    async fn fetch_members(&self, guild_id: GuildId) -> Result<Vec<GuildMemberEntry>, AppError> {
        let mut entries = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = guild_id
                .members(&self.http, Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let page_len = page.len() as u64;

            after = page.last().map(|member| member.user.id);
            entries.extend(page.iter().map(member_entry));

            if page_len < MEMBER_PAGE_SIZE {
                break;
            }
        }

        tracing::debug!(
            "Fetched {} members from Discord API for guild {}",
            entries.len(),
            guild_id
        );

        Ok(entries)
    }
}

#[async_trait]
impl GuildPlatform for SerenityPlatform {
    fn current_user_id(&self) -> u64 {
        self.cache.current_user().id.get()
    }

    async fn send_text(&self, channel_id: u64, content: &str) -> Result<u64, AppError> {
        let message = ChannelId::new(channel_id).say(&self.http, content).await?;
        Ok(message.id.get())
    }

    async fn send_record(&self, channel_id: u64, record: &AuditRecord) -> Result<(), AppError> {
        let message = CreateMessage::new().embed(build_embed(record)?);
        ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;
        Ok(())
    }

    async fn send_direct_message(&self, user_id: u64, content: &str) -> Result<(), AppError> {
        UserId::new(user_id)
            .direct_message(&self.http, CreateMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete_message(&self.http, MessageId::new(message_id))
            .await
            .map_err(|e| absent_or(e, || format!("Message {} not found", message_id)))?;
        Ok(())
    }

    async fn channel_name(&self, channel_id: u64) -> Result<Option<String>, AppError> {
        let channel_id = ChannelId::new(channel_id);

        if let Some(channel) = self.cache.channel(channel_id) {
            return Ok(Some(channel.name.clone()));
        }

        match channel_id.to_channel(&self.http).await {
            Ok(Channel::Guild(channel)) => Ok(Some(channel.name)),
            Ok(_) => Ok(None),
            Err(e) => match absent_or(e, || format!("Channel {} not found", channel_id)) {
                AppError::NotFound(_) => Ok(None),
                err => Err(err),
            },
        }
    }

    async fn latest_message_id(&self, channel_id: u64) -> Result<Option<u64>, AppError> {
        let messages = ChannelId::new(channel_id)
            .messages(&self.http, GetMessages::new().limit(1))
            .await?;
        Ok(messages.first().map(|message| message.id.get()))
    }

    async fn guild_snapshot(&self, guild_id: u64) -> Result<GuildSnapshot, AppError> {
        let id = GuildId::new(guild_id);

        // Cache refs must be dropped before the next await.
        let cached = self.cache.guild(id).map(|guild| {
            (
                guild.name.clone(),
                role_snapshots(guild.roles.values()),
                category_snapshots(guild.channels.values()),
            )
        });

        let (name, roles, categories) = match cached {
            Some(parts) => parts,
            None => {
                tracing::debug!("Guild {} not cached, fetching from Discord API", guild_id);
                let guild = id.to_partial_guild(&self.http).await.map_err(|e| {
                    match absent_or(e, || format!("Guild {} not found", guild_id)) {
                        AppError::NotFound(_) => InternalError::MissingGuild(guild_id).into(),
                        err => err,
                    }
                })?;
                let channels = id.channels(&self.http).await?;
                (
                    guild.name.clone(),
                    role_snapshots(guild.roles.values()),
                    category_snapshots(channels.values()),
                )
            }
        };

        let members = self.fetch_members(id).await?;

        Ok(GuildSnapshot {
            id: guild_id,
            name,
            members,
            roles,
            categories,
        })
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        ChannelId::new(channel_id)
            .delete(&self.http)
            .await
            .map_err(|e| absent_or(e, || format!("Channel {} not found", channel_id)))?;
        Ok(())
    }

    async fn create_locked_voice_channel(
        &self,
        guild_id: u64,
        category_id: u64,
        name: &str,
    ) -> Result<u64, AppError> {
        // The base role shares the guild's id.
        let locked = PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::CONNECT,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
        };

        let builder = CreateChannel::new(name)
            .kind(ChannelType::Voice)
            .category(ChannelId::new(category_id))
            .permissions(vec![locked]);

        let channel = GuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await?;
        Ok(channel.id.get())
    }

    async fn set_role_position(
        &self,
        guild_id: u64,
        role_id: u64,
        position: u16,
    ) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .edit_role_position(&self.http, RoleId::new(role_id), position)
            .await?;
        Ok(())
    }
}

/// Converts a Discord 404 into `AppError::NotFound`, passing other errors through.
fn absent_or(err: serenity::Error, describe: impl FnOnce() -> String) -> AppError {
    let err = AppError::from(err);
    if err.is_not_found() {
        AppError::NotFound(describe())
    } else {
        err
    }
}

/// Renders an audit record as a Discord embed.
///
/// # Returns
/// - `Ok(CreateEmbed)` - Embed ready for posting
/// - `Err(AppError::InternalError)` - The record timestamp is out of Discord's range
pub fn build_embed(record: &AuditRecord) -> Result<CreateEmbed, AppError> {
    let unix = record.timestamp.timestamp();
    let timestamp = Timestamp::from_unix_timestamp(unix).map_err(|e| {
        AppError::InternalError(InternalError::InvalidDiscordTimestamp {
            timestamp: unix,
            reason: e.to_string(),
        })
    })?;

    let mut author = CreateEmbedAuthor::new(&record.author);
    if let Some(icon) = &record.author_icon {
        author = author.icon_url(icon);
    }

    let mut embed = CreateEmbed::new()
        .author(author)
        .color(record.color)
        .timestamp(timestamp);

    if let Some(description) = &record.description {
        embed = embed.description(description);
    }

    for field in &record.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }

    Ok(embed)
}

fn member_entry(member: &Member) -> GuildMemberEntry {
    GuildMemberEntry {
        id: member.user.id.get(),
        bot: member.user.bot,
        role_ids: member.roles.iter().map(|role| role.get()).collect(),
    }
}

pub fn role_snapshots<'a>(roles: impl Iterator<Item = &'a Role>) -> Vec<RoleSnapshot> {
    roles
        .map(|role| RoleSnapshot {
            id: role.id.get(),
            name: role.name.clone(),
            position: role.position,
        })
        .collect()
}

/// Groups channels under their categories.
///
/// Child channels are ordered by position, then id, matching the order Discord
/// shows them in.
pub fn category_snapshots<'a>(
    channels: impl Iterator<Item = &'a GuildChannel> + Clone,
) -> Vec<CategorySnapshot> {
    let mut categories: Vec<&GuildChannel> = channels
        .clone()
        .filter(|channel| channel.kind == ChannelType::Category)
        .collect();
    categories.sort_by_key(|category| (category.position, category.id));

    categories
        .into_iter()
        .map(|category| {
            let mut children: Vec<&GuildChannel> = channels
                .clone()
                .filter(|channel| channel.parent_id == Some(category.id))
                .collect();
            children.sort_by_key(|channel| (channel.position, channel.id));

            CategorySnapshot {
                id: category.id.get(),
                name: category.name.clone(),
                channel_ids: children.iter().map(|channel| channel.id.get()).collect(),
            }
        })
        .collect()
}
