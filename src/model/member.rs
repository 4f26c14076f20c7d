//! Guild member snapshots.

use chrono::{DateTime, Utc};
use serenity::all::{Member, Role, RoleId, Timestamp, User};
use std::collections::HashMap;

/// Read-only view of a guild member (or message author) at event time.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSnapshot {
    /// Discord user ID.
    pub id: u64,
    /// Account username.
    pub name: String,
    /// `name#discriminator`, or the bare name for migrated usernames.
    pub tag: String,
    /// Avatar URL, falling back to Discord's default avatar.
    pub avatar_url: String,
    pub bot: bool,
    /// Guild nickname, if set.
    pub nickname: Option<String>,
    /// Names of the member's roles ordered by position, lowest first.
    pub role_names: Vec<String>,
    /// When the member joined the guild, if known.
    pub joined_at: Option<DateTime<Utc>>,
    /// When the Discord account was created.
    pub created_at: DateTime<Utc>,
}

impl MemberSnapshot {
    /// Builds a snapshot from a bare user, with no guild-specific data.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            tag: user.tag(),
            avatar_url: user.face(),
            bot: user.bot,
            nickname: None,
            role_names: Vec::new(),
            joined_at: None,
            created_at: to_chrono(user.id.created_at()).unwrap_or_default(),
        }
    }

    /// Builds a snapshot from a guild member.
    ///
    /// # Arguments
    /// - `member` - Serenity guild member
    /// - `roles` - The guild's roles, used to resolve the member's role names;
    ///   role ids missing from the map are skipped
    pub fn from_member(member: &Member, roles: &HashMap<RoleId, Role>) -> Self {
        let mut member_roles: Vec<&Role> = member
            .roles
            .iter()
            .filter_map(|role_id| roles.get(role_id))
            .collect();
        member_roles.sort_by_key(|role| role.position);

        Self {
            nickname: member.nick.clone(),
            role_names: member_roles.iter().map(|role| role.name.clone()).collect(),
            joined_at: member.joined_at.and_then(to_chrono),
            ..Self::from_user(&member.user)
        }
    }

    /// Discord mention markup for this member.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Converts a Serenity timestamp to a chrono UTC datetime.
pub fn to_chrono(timestamp: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
}
