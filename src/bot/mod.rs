//! Discord gateway runtime.
//!
//! The handler converts Serenity events into [`GuildEvent`](crate::model::event::GuildEvent)
//! snapshots and hands them to the audit router. Events from guilds other than
//! the configured one are ignored. Failures are logged and never stop the bot
//! from processing further events.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role data
//! - `GUILD_MEMBERS` - Member joins, leaves and nickname changes (privileged)
//! - `GUILD_MESSAGES` - Message creates, edits and deletes
//! - `MESSAGE_CONTENT` - Message text for the audit log (privileged)
//! - `GUILD_PRESENCES` - Status changes (privileged)

pub mod cache;
pub mod handler;
pub mod platform;
pub mod start;
