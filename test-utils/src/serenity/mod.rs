//! Test factories for creating Serenity API objects.
//!
//! These factories build valid Serenity structs by deserializing JSON, simulating
//! what Discord's gateway would deliver, so conversion code can be exercised
//! without a live connection.
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_role};
//!
//! let role = create_test_role(111111111, "CMPSC 131", 4);
//! let member = create_test_member(123456789, "alice", &[111111111]);
//! ```
//!
//! # Available Factories
//!
//! - `channel::create_test_channel` - Create Serenity GuildChannel objects
//! - `member::create_test_member` - Create Serenity Member objects
//! - `role::create_test_role` - Create Serenity Role objects
//! - `user::create_test_user` - Create Serenity User objects

pub mod channel;
pub mod member;
pub mod role;
pub mod user;

// Re-export commonly used functions for convenience
pub use channel::create_test_channel;
pub use member::create_test_member;
pub use role::create_test_role;
pub use user::create_test_user;
