//! SeaORM entities for the tables the bot reads.

pub mod prelude;

pub mod counting_channel;
