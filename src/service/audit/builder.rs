//! Audit record builders.
//!
//! Each builder turns one event's snapshots into the record posted to the staff
//! log channel. Identity lines follow the layout staff are used to:
//!
//! ```text
//! ► Name: `alice#0001` <@123> [123]
//! ► Joined Server On: **<t:1705320000:F>**
//! ```

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    model::{
        event::PresenceStatus, guild::BASE_ROLE_NAME, member::MemberSnapshot,
        message::MessageSnapshot, record::AuditRecord,
    },
};

/// Membership changes.
pub const MEMBERSHIP_COLOR: u32 = 0xA30000;
pub const DELETED_COLOR: u32 = 0xFF8B00;
pub const EDITED_COLOR: u32 = 0x0076FA;
/// Nickname and presence changes.
pub const PROFILE_COLOR: u32 = 0xFFF25A;

/// Discord rejects embed field values longer than this.
const MAX_FIELD_LENGTH: usize = 1024;
const EMPTY_FIELD: &str = "*(empty)*";

/// Renders a timestamp as Discord markup shown in each reader's timezone.
pub fn discord_time(at: DateTime<Utc>) -> String {
    format!("<t:{}:F>", at.timestamp())
}

/// Makes arbitrary text acceptable as an embed field value.
pub fn field_text(value: &str) -> String {
    if value.trim().is_empty() {
        return EMPTY_FIELD.to_string();
    }
    if value.chars().count() <= MAX_FIELD_LENGTH {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(MAX_FIELD_LENGTH - 1).collect();
    truncated.push('…');
    truncated
}

fn name_line(member: &MemberSnapshot) -> String {
    format!("► Name: `{}` {} [{}]", member.tag, member.mention(), member.id)
}

fn joined_line(member: &MemberSnapshot) -> String {
    let joined = member
        .joined_at
        .map(discord_time)
        .unwrap_or_else(|| "Unknown".to_string());
    format!("► Joined Server On: **{}**", joined)
}

fn identity(member: &MemberSnapshot) -> String {
    format!("{}\n{}", name_line(member), joined_line(member))
}

pub fn joined_record(member: &MemberSnapshot) -> AuditRecord {
    let value = format!(
        "{}\n► Created Account On: **{}**",
        identity(member),
        discord_time(member.created_at)
    );

    AuditRecord::new(&member.name, MEMBERSHIP_COLOR)
        .icon(&member.avatar_url)
        .field("Member joined the server", value, false)
}

/// Leave record. Every member holds the base role, so it always leads the list.
pub fn left_record(member: &MemberSnapshot) -> AuditRecord {
    let roles = std::iter::once(BASE_ROLE_NAME)
        .chain(member.role_names.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ");
    let value = format!("{}\n► Roles: `{}`", identity(member), roles);

    AuditRecord::new(&member.name, MEMBERSHIP_COLOR)
        .icon(&member.avatar_url)
        .field("Member left or was kicked from the server", value, false)
}

/// Plain notice posted before the detailed leave record.
pub fn left_notice(member: &MemberSnapshot) -> String {
    format!("{} left the server 🙁.", member.name)
}

pub fn deleted_record(message: &MessageSnapshot, channel: &str) -> AuditRecord {
    let author = &message.author;

    AuditRecord::new(
        format!("Message by {} deleted in #{}", author.tag, channel),
        DELETED_COLOR,
    )
    .icon(&author.avatar_url)
    .description(format!("{}\n► Message ID: {}", identity(author), message.id))
    .field("Message Content", field_text(&message.content), false)
}

pub fn uncached_deleted_record(message_id: u64, channel: &str) -> AuditRecord {
    AuditRecord::new(
        format!("Uncached Message deleted in #{}", channel),
        DELETED_COLOR,
    )
    .description(format!("► Message ID: {}", message_id))
}

pub fn edited_record(
    before: &MessageSnapshot,
    after: &MessageSnapshot,
    channel: &str,
) -> AuditRecord {
    let author = &before.author;

    AuditRecord::new(
        format!("Message in #{} edited by {}", channel, author.tag),
        EDITED_COLOR,
    )
    .icon(&author.avatar_url)
    .description(format!("{}\n► Message ID: {}", identity(author), before.id))
    .field("Original Content", field_text(&before.content), true)
    .field("New Content", field_text(&after.content), true)
}

pub fn nickname_record(before: &MemberSnapshot, after: &MemberSnapshot) -> AuditRecord {
    let nickname = |member: &MemberSnapshot| {
        member
            .nickname
            .clone()
            .unwrap_or_else(|| "None".to_string())
    };

    AuditRecord::new(format!("{}'s nickname was changed", before.tag), PROFILE_COLOR)
        .icon(&before.avatar_url)
        .description(identity(before))
        .field("Original Nickname", field_text(&nickname(before)), true)
        .field("New Nickname", field_text(&nickname(after)), true)
}

pub fn presence_record(
    member: &MemberSnapshot,
    before: PresenceStatus,
    after: PresenceStatus,
) -> AuditRecord {
    AuditRecord::new(format!("{}'s status was changed", member.tag), PROFILE_COLOR)
        .icon(&member.avatar_url)
        .description(identity(member))
        .field("Original Status", before.to_string(), true)
        .field("New Status", after.to_string(), true)
}

/// Direct message sent to new members.
pub fn welcome_message(guild_name: &str, config: &Config) -> String {
    format!(
        "Welcome to {}!\n\
         Head on over to <#{}> to join one of the classes listed there.\n\
         If a certain class isn't listed there, you can create a group chat for that \
         certain class by doing `!create` in <#{}> to get started.",
        guild_name, config.class_sub_channel_id, config.bot_channel_id
    )
}
