//! Counting channel factory for seeding the counter row.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating counter rows with customizable values.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::counting_channel::CountingChannelFactory;
///
/// let row = CountingChannelFactory::new(&db)
///     .current_number(42)
///     .build()
///     .await?;
/// ```
pub struct CountingChannelFactory<'a> {
    db: &'a DatabaseConnection,
    id: Option<i32>,
    current_number: i64,
}

impl<'a> CountingChannelFactory<'a> {
    /// Creates a new factory with `current_number` set to 1 and an auto-assigned id.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: None,
            current_number: 1,
        }
    }

    /// Sets an explicit primary key.
    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the counter value.
    pub fn current_number(mut self, current_number: i64) -> Self {
        self.current_number = current_number;
        self
    }

    /// Builds and inserts the counter row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::counting_channel::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::counting_channel::Model, DbErr> {
        entity::counting_channel::ActiveModel {
            id: match self.id {
                Some(id) => ActiveValue::Set(id),
                None => ActiveValue::NotSet,
            },
            current_number: ActiveValue::Set(self.current_number),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a counter row holding `current_number`.
///
/// Shorthand for `CountingChannelFactory::new(db).current_number(n).build().await`.
pub async fn create_counting_channel(
    db: &DatabaseConnection,
    current_number: i64,
) -> Result<entity::counting_channel::Model, DbErr> {
    CountingChannelFactory::new(db)
        .current_number(current_number)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn creates_counter_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(CountingChannel)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let row = CountingChannelFactory::new(db).build().await?;
        assert_eq!(row.current_number, 1);

        let stored = CountingChannel::find_by_id(row.id).one(db).await?;
        assert_eq!(stored, Some(row));

        Ok(())
    }

    #[tokio::test]
    async fn creates_counter_with_explicit_id() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(CountingChannel)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let row = CountingChannelFactory::new(db)
            .id(7)
            .current_number(99)
            .build()
            .await?;

        assert_eq!(row.id, 7);
        assert_eq!(row.current_number, 99);

        Ok(())
    }
}
