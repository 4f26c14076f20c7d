use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, EventHandler, Guild, GuildId, GuildMemberUpdateEvent, Member, Message,
    MessageId, MessageUpdateEvent, Presence, Ready, Role, RoleId, User,
};
use serenity::async_trait;
use std::collections::HashMap;

use crate::{
    bot::{cache::SnapshotCache, platform::SerenityPlatform},
    config::Config,
    model::event::GuildEvent,
    service::audit::AuditEventRouter,
};

pub mod guild;
pub mod member;
pub mod message;
pub mod presence;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Config,
    pub cache: SnapshotCache,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let cache = SnapshotCache::new(config.message_cache_size);
        Self { db, config, cache }
    }

    /// Whether an event belongs to the configured guild.
    pub fn is_home_guild(&self, guild_id: Option<GuildId>) -> bool {
        guild_id.map(|id| id.get()) == Some(self.config.guild_id)
    }

    /// Runs an event through the audit router, logging any failure.
    pub async fn dispatch(&self, ctx: &Context, event: GuildEvent) {
        let kind = event.kind();
        let platform = SerenityPlatform::new(ctx.cache.clone(), ctx.http.clone());
        let router = AuditEventRouter::new(&self.db, &platform, &self.config);

        if let Err(e) = router.dispatch(event).await {
            tracing::error!("Failed to handle {} event: {}", kind, e);
        }
    }
}

/// Roles of a cached guild, empty when the guild is not cached.
pub fn cached_roles(ctx: &Context, guild_id: GuildId) -> HashMap<RoleId, Role> {
    ctx.cache
        .guild(guild_id)
        .map(|guild| guild.roles.clone())
        .unwrap_or_default()
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(self, ctx, guild, is_new).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(self, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(self, ctx, guild_id, user, member_data_if_available)
            .await;
    }

    /// Called when a member is updated in a guild (roles, nickname, etc.)
    async fn guild_member_update(
        &self,
        ctx: Context,
        old_if_available: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        member::handle_guild_member_update(self, ctx, old_if_available, new, event).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, new_message: Message) {
        message::handle_message(self, ctx, new_message).await;
    }

    /// Called when a message is deleted
    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        message::handle_message_delete(self, ctx, channel_id, deleted_message_id, guild_id).await;
    }

    /// Called when a message is edited
    async fn message_update(
        &self,
        ctx: Context,
        old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        message::handle_message_update(self, ctx, old_if_available, new, event).await;
    }

    /// Called when a member's status changes
    async fn presence_update(&self, ctx: Context, new_data: Presence) {
        presence::handle_presence_update(self, ctx, new_data).await;
    }
}
