use serenity::all::{Context, Presence};

use super::Handler;
use crate::model::{
    event::{GuildEvent, PresenceStatus},
    member::MemberSnapshot,
};

/// Handles the presence_update event when a member's status changes.
///
/// The previous status comes from the presence map. The first update seen for a
/// member only records the status.
pub async fn handle_presence_update(handler: &Handler, ctx: Context, presence: Presence) {
    let Some(guild_id) = presence.guild_id else {
        return;
    };
    if !handler.is_home_guild(Some(guild_id)) {
        return;
    }

    let user_id = presence.user.id;
    let after = PresenceStatus::from(presence.status);

    let Some(before) = handler.cache.swap_presence(user_id.get(), after).await else {
        return;
    };
    if before == after {
        return;
    }

    let member = ctx.cache.guild(guild_id).and_then(|guild| {
        guild
            .members
            .get(&user_id)
            .map(|member| MemberSnapshot::from_member(member, &guild.roles))
    });
    let member = member.or_else(|| {
        presence
            .user
            .to_user()
            .map(|user| MemberSnapshot::from_user(&user))
    });
    let Some(member) = member else {
        tracing::debug!("No user data for presence update of {}", user_id);
        return;
    };

    handler
        .dispatch(
            &ctx,
            GuildEvent::PresenceChanged {
                member,
                before,
                after,
            },
        )
        .await;
}
