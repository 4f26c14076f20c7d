use serenity::all::{ChannelId, Context, GuildId, Message, MessageId, MessageUpdateEvent};

use super::Handler;
use crate::model::{event::GuildEvent, message::MessageSnapshot};

/// Handle message creation in a channel
///
/// Guild messages are remembered so later deletes and edits can be logged with
/// their content.
pub async fn handle_message(handler: &Handler, _ctx: Context, message: Message) {
    if !handler.is_home_guild(message.guild_id) {
        return;
    }

    handler
        .cache
        .insert_message(MessageSnapshot::from_message(&message))
        .await;
}

/// Handle message deletion in a channel
pub async fn handle_message_delete(
    handler: &Handler,
    ctx: Context,
    channel_id: ChannelId,
    deleted_message_id: MessageId,
    guild_id: Option<GuildId>,
) {
    if !handler.is_home_guild(guild_id) {
        return;
    }

    let event = match handler.cache.take_message(deleted_message_id.get()).await {
        Some(message) => GuildEvent::MessageDeleted(message),
        None => GuildEvent::UncachedMessageDeleted {
            channel_id: channel_id.get(),
            message_id: deleted_message_id.get(),
        },
    };

    handler.dispatch(&ctx, event).await;
}

/// Handle message edits
///
/// The previous version comes from the snapshot cache. When the message was
/// never cached the current version is fetched so the counting check can still
/// run.
pub async fn handle_message_update(
    handler: &Handler,
    ctx: Context,
    _old_if_available: Option<Message>,
    new: Option<Message>,
    event: MessageUpdateEvent,
) {
    if !handler.is_home_guild(event.guild_id) {
        return;
    }

    let before = handler.cache.message(event.id.get()).await;

    let after = match (new, &before) {
        (Some(message), _) => MessageSnapshot::from_message(&message),
        (None, Some(before)) => MessageSnapshot {
            content: event.content.clone().unwrap_or_else(|| before.content.clone()),
            ..before.clone()
        },
        (None, None) => match event.channel_id.message(&ctx, event.id).await {
            Ok(message) => MessageSnapshot::from_message(&message),
            Err(e) => {
                tracing::error!("Failed to fetch edited message {}: {}", event.id, e);
                return;
            }
        },
    };

    handler.cache.insert_message(after.clone()).await;
    handler
        .dispatch(&ctx, GuildEvent::MessageEdited { before, after })
        .await;
}
