use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The counting game owns this table; it may already exist.
        manager
            .create_table(
                Table::create()
                    .table(CountingChannel::Table)
                    .if_not_exists()
                    .col(pk_auto(CountingChannel::Id))
                    .col(big_integer(CountingChannel::CurrentNumber).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CountingChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CountingChannel {
    #[sea_orm(iden = "Counting_Channel")]
    Table,
    Id,
    CurrentNumber,
}
