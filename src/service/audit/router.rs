use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    error::AppError,
    model::{
        event::{GuildEvent, PresenceStatus},
        member::MemberSnapshot,
        message::MessageSnapshot,
        record::AuditRecord,
    },
    service::{
        audit::builder,
        counting::CountingGuard,
        member_count::MemberCountService,
        platform::GuildPlatform,
        role_order::RoleOrderService,
    },
};

/// Turns guild lifecycle events into audit records and maintenance actions.
///
/// Every record goes to `config.log_channel_id`. Member joins and leaves also
/// refresh the member count channel, and leaves re-rank class roles.
pub struct AuditEventRouter<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn GuildPlatform,
    config: &'a Config,
}

impl<'a> AuditEventRouter<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a dyn GuildPlatform,
        config: &'a Config,
    ) -> Self {
        Self { db, platform, config }
    }

    /// Handles one event to completion.
    ///
    /// # Returns
    /// - `Ok(())` - Event handled, including events that produce no record
    /// - `Err(AppError)` - A platform call or counter read failed
    pub async fn dispatch(&self, event: GuildEvent) -> Result<(), AppError> {
        tracing::debug!("Dispatching {} event", event.kind());

        match event {
            GuildEvent::MemberJoined(member) => self.member_joined(&member).await,
            GuildEvent::MemberLeft(member) => self.member_left(&member).await,
            GuildEvent::MessageDeleted(message) => self.message_deleted(&message).await,
            GuildEvent::UncachedMessageDeleted {
                channel_id,
                message_id,
            } => self.uncached_message_deleted(channel_id, message_id).await,
            GuildEvent::MessageEdited { before, after } => {
                self.message_edited(before.as_ref(), &after).await
            }
            GuildEvent::NicknameChanged { before, after } => {
                self.nickname_changed(&before, &after).await
            }
            GuildEvent::PresenceChanged {
                member,
                before,
                after,
            } => self.presence_changed(&member, before, after).await,
        }
    }

    async fn member_joined(&self, member: &MemberSnapshot) -> Result<(), AppError> {
        let guild = self.platform.guild_snapshot(self.config.guild_id).await?;
        MemberCountService::new(self.platform).refresh(&guild).await?;

        tracing::info!("{} joined the server", member.name);

        let welcome = builder::welcome_message(&guild.name, self.config);
        match self.platform.send_direct_message(member.id, &welcome).await {
            Ok(()) => tracing::info!("Sent welcome message to {}", member.name),
            Err(e) => tracing::warn!("Could not send welcome message to {}: {}", member.name, e),
        }

        self.log(&builder::joined_record(member)).await
    }

    async fn member_left(&self, member: &MemberSnapshot) -> Result<(), AppError> {
        let guild = self.platform.guild_snapshot(self.config.guild_id).await?;
        MemberCountService::new(self.platform).refresh(&guild).await?;

        tracing::info!("{} left the server", member.name);

        let moved = RoleOrderService::new(self.platform, self.config)
            .reorder(&guild)
            .await?;
        tracing::debug!("Moved {} roles after {} left", moved, member.name);

        self.platform
            .send_text(self.config.log_channel_id, &builder::left_notice(member))
            .await?;
        self.log(&builder::left_record(member)).await
    }

    async fn message_deleted(&self, message: &MessageSnapshot) -> Result<(), AppError> {
        if message.author.id == self.platform.current_user_id() {
            return Ok(());
        }

        if self.is_auto_deleted_command(&message.content) {
            tracing::debug!("Ignoring deleted command message {}", message.id);
            return Ok(());
        }

        let channel = self.channel_label(message.channel_id).await?;
        self.log(&builder::deleted_record(message, &channel)).await?;

        CountingGuard::new(self.db, self.platform, self.config)
            .on_deleted(message)
            .await?;
        Ok(())
    }

    async fn uncached_message_deleted(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), AppError> {
        // Deleting a whole channel also deletes its messages.
        let Some(channel) = self.platform.channel_name(channel_id).await? else {
            return Ok(());
        };

        self.log(&builder::uncached_deleted_record(message_id, &channel)).await
    }

    async fn message_edited(
        &self,
        before: Option<&MessageSnapshot>,
        after: &MessageSnapshot,
    ) -> Result<(), AppError> {
        if let Some(before) = before {
            let by_bot = after.author.id == self.platform.current_user_id();
            // Link previews resolving also produce an update with the same content.
            if !by_bot && before.content != after.content {
                let channel = self.channel_label(after.channel_id).await?;
                self.log(&builder::edited_record(before, after, &channel)).await?;
            }
        }

        CountingGuard::new(self.db, self.platform, self.config)
            .on_edited(after)
            .await?;
        Ok(())
    }

    async fn nickname_changed(
        &self,
        before: &MemberSnapshot,
        after: &MemberSnapshot,
    ) -> Result<(), AppError> {
        if before.nickname == after.nickname {
            return Ok(());
        }

        self.log(&builder::nickname_record(before, after)).await
    }

    async fn presence_changed(
        &self,
        member: &MemberSnapshot,
        before: PresenceStatus,
        after: PresenceStatus,
    ) -> Result<(), AppError> {
        if before == after {
            return Ok(());
        }

        self.log(&builder::presence_record(member, before, after)).await
    }

    fn is_auto_deleted_command(&self, content: &str) -> bool {
        let content = content.to_uppercase();
        self.config
            .auto_delete_commands
            .iter()
            .any(|prefix| content.starts_with(&prefix.to_uppercase()))
    }

    async fn channel_label(&self, channel_id: u64) -> Result<String, AppError> {
        Ok(self
            .platform
            .channel_name(channel_id)
            .await?
            .unwrap_or_else(|| channel_id.to_string()))
    }

    async fn log(&self, record: &AuditRecord) -> Result<(), AppError> {
        self.platform
            .send_record(self.config.log_channel_id, record)
            .await
    }
}
