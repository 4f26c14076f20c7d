//! Counting game repository.
//!
//! The counting game stores its expected next value in a single row of the
//! `Counting_Channel` table. Another process advances it; this repository only
//! reads it so the counting guard can restore deleted or edited numbers.

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::error::{internal::InternalError, AppError};

pub struct CountingChannelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CountingChannelRepository<'a> {
    /// Creates a new repository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the current counting number.
    ///
    /// Reads the first row by primary key. Extra rows are ignored.
    ///
    /// # Returns
    /// - `Ok(Some(u64))` - The current counter value
    /// - `Ok(None)` - The table has no rows yet
    /// - `Err(AppError::InternalError)` - The stored value is negative
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn get_current_number(&self) -> Result<Option<u64>, AppError> {
        let Some(row) = entity::prelude::CountingChannel::find()
            .order_by_asc(entity::counting_channel::Column::Id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        u64::try_from(row.current_number)
            .map(Some)
            .map_err(|_| InternalError::NegativeCounter(row.current_number).into())
    }
}
