use serenity::all::{ChunkGuildFilter, Context, Guild};

use super::Handler;
use crate::model::event::PresenceStatus;

/// Handles the guild_create event when a guild becomes available.
///
/// Requests the full member list when the gateway sent only part of it, so
/// leave and nickname events find the member in the cache. Seeds the presence
/// map so the first status change of each member can be reported with its
/// previous value.
pub async fn handle_guild_create(
    handler: &Handler,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    if !handler.is_home_guild(Some(guild.id)) {
        tracing::debug!("Ignoring guild {} ({})", guild.name, guild.id);
        return;
    }

    tracing::info!(
        "Guild {} available - member_count: {}, cached members: {}, presences: {}",
        guild.name,
        guild.member_count,
        guild.members.len(),
        guild.presences.len()
    );

    if needs_member_chunk(guild.members.len(), guild.member_count) {
        tracing::debug!("Requesting member chunks for guild {}", guild.id);
        ctx.shard.chunk_guild(guild.id, None, false, ChunkGuildFilter::None, None);
    }

    let statuses = guild
        .presences
        .iter()
        .map(|(user_id, presence)| (user_id.get(), PresenceStatus::from(presence.status)));
    handler.cache.seed_presences(statuses).await;
}

/// Whether the gateway delivered fewer members than the guild reports.
fn needs_member_chunk(cached: usize, member_count: u64) -> bool {
    (cached as u64) < member_count
}
