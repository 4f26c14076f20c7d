//! Counter row for the counting game channel.
//!
//! The counting game owns the `Counting_Channel` table: an id column followed by
//! the counter, advanced elsewhere. The bot only ever reads it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Counting_Channel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub current_number: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
