//! Lifecycle events handled by the audit router.

use serenity::all::OnlineStatus;
use std::fmt;

use super::{member::MemberSnapshot, message::MessageSnapshot};

/// One guild lifecycle event with a fully-typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GuildEvent {
    MemberJoined(MemberSnapshot),
    MemberLeft(MemberSnapshot),
    /// A message whose content was in the snapshot cache was deleted.
    MessageDeleted(MessageSnapshot),
    /// A message the bot never saw (or already evicted) was deleted.
    UncachedMessageDeleted { channel_id: u64, message_id: u64 },
    /// `before` is None when the edited message was not cached.
    MessageEdited {
        before: Option<MessageSnapshot>,
        after: MessageSnapshot,
    },
    NicknameChanged {
        before: MemberSnapshot,
        after: MemberSnapshot,
    },
    PresenceChanged {
        member: MemberSnapshot,
        before: PresenceStatus,
        after: PresenceStatus,
    },
}

impl GuildEvent {
    /// Short event name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MemberJoined(_) => "member_joined",
            Self::MemberLeft(_) => "member_left",
            Self::MessageDeleted(_) => "message_deleted",
            Self::UncachedMessageDeleted { .. } => "uncached_message_deleted",
            Self::MessageEdited { .. } => "message_edited",
            Self::NicknameChanged { .. } => "nickname_changed",
            Self::PresenceChanged { .. } => "presence_changed",
        }
    }
}

/// Online status shown in presence records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    Invisible,
    Offline,
}

impl From<OnlineStatus> for PresenceStatus {
    fn from(status: OnlineStatus) -> Self {
        match status {
            OnlineStatus::Online => Self::Online,
            OnlineStatus::Idle => Self::Idle,
            OnlineStatus::DoNotDisturb => Self::DoNotDisturb,
            OnlineStatus::Invisible => Self::Invisible,
            _ => Self::Offline,
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::DoNotDisturb => "dnd",
            Self::Invisible => "invisible",
            Self::Offline => "offline",
        };
        f.write_str(name)
    }
}
