//! Factory methods for creating test data.
//!
//! Each table has a `Factory` struct for customization and a `create_*`
//! convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let counter = factory::counting_channel::CountingChannelFactory::new(&db)
//!     .current_number(5)
//!     .build()
//!     .await?;
//! ```

pub mod counting_channel;

pub use counting_channel::create_counting_channel;
