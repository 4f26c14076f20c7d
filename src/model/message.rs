//! Message snapshots.

use serenity::all::Message;

use super::member::{to_chrono, MemberSnapshot};

/// Content and authorship of a guild message as last seen by the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSnapshot {
    pub id: u64,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub author: MemberSnapshot,
    pub content: String,
}

impl MessageSnapshot {
    /// Builds a snapshot from a Serenity message.
    ///
    /// The author's join date comes from the partial member attached to guild
    /// messages; it is unknown for messages that carry no member data.
    pub fn from_message(message: &Message) -> Self {
        let mut author = MemberSnapshot::from_user(&message.author);
        if let Some(member) = &message.member {
            author.nickname = member.nick.clone();
            author.joined_at = member.joined_at.and_then(to_chrono);
        }

        Self {
            id: message.id.get(),
            channel_id: message.channel_id.get(),
            guild_id: message.guild_id.map(|id| id.get()),
            author,
            content: message.content.clone(),
        }
    }
}
