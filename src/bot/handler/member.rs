use serenity::all::{Context, GuildId, GuildMemberUpdateEvent, Member, User};

use super::{cached_roles, Handler};
use crate::model::{event::GuildEvent, member::MemberSnapshot};

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(handler: &Handler, ctx: Context, new_member: Member) {
    if !handler.is_home_guild(Some(new_member.guild_id)) {
        return;
    }

    let roles = cached_roles(&ctx, new_member.guild_id);
    let member = MemberSnapshot::from_member(&new_member, &roles);

    handler.dispatch(&ctx, GuildEvent::MemberJoined(member)).await;
}

/// Handles the guild_member_removal event when a member leaves a guild
///
/// Member data is only available when the member was cached; otherwise the
/// record has no roles or join date.
pub async fn handle_guild_member_removal(
    handler: &Handler,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    member_data_if_available: Option<Member>,
) {
    if !handler.is_home_guild(Some(guild_id)) {
        return;
    }

    let member = match member_data_if_available {
        Some(member) => MemberSnapshot::from_member(&member, &cached_roles(&ctx, guild_id)),
        None => {
            tracing::debug!("No cached member data for {} ({})", user.name, user.id);
            MemberSnapshot::from_user(&user)
        }
    };

    handler.dispatch(&ctx, GuildEvent::MemberLeft(member)).await;
}

/// Handles the guild_member_update event when a member is updated in a guild
///
/// Only nickname changes are reported. Updates for members that were not cached
/// before the change are skipped since there is nothing to compare against.
pub async fn handle_guild_member_update(
    handler: &Handler,
    ctx: Context,
    old_if_available: Option<Member>,
    new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    if !handler.is_home_guild(Some(event.guild_id)) {
        return;
    }

    let Some(old) = old_if_available else {
        tracing::debug!("Member {} was not cached, skipping update", event.user.id);
        return;
    };

    let roles = cached_roles(&ctx, event.guild_id);
    let before = MemberSnapshot::from_member(&old, &roles);
    let after = match new {
        Some(member) => MemberSnapshot::from_member(&member, &roles),
        None => MemberSnapshot {
            nickname: event.nick.clone(),
            ..before.clone()
        },
    };

    handler
        .dispatch(&ctx, GuildEvent::NicknameChanged { before, after })
        .await;
}
