//! Staff Logbot Test Utils
//!
//! Shared testing utilities for the bot's unit and integration tests. The crate
//! offers a builder for test contexts backed by in-memory SQLite databases, entity
//! factories for seeding rows, and factories for Serenity model objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::CountingChannel;
//!
//! #[tokio::test]
//! async fn reads_counter() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(CountingChannel)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
