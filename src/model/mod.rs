//! Domain models passed between the bot runtime and the services.
//!
//! Serenity objects are converted into these snapshots at the edge of the bot
//! runtime. Services only ever see the snapshots, so they can be tested without a
//! gateway connection.

pub mod event;
pub mod guild;
pub mod member;
pub mod message;
pub mod record;
