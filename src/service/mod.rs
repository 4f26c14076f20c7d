//! Business logic of the bot.
//!
//! Services talk to Discord only through [`platform::GuildPlatform`], which lets
//! tests drive them with a recording implementation.

pub mod audit;
pub mod binary;
pub mod counting;
pub mod member_count;
pub mod platform;
pub mod role_order;

#[cfg(test)]
pub(crate) mod test;
