//! Create place table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Place::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Place::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Place::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Place::StreetAddress).string_len(100).not_null())
                    .col(ColumnDef::new(Place::Suburb).string_len(50).not_null())
                    .col(ColumnDef::new(Place::State).string_len(3).not_null())
                    .col(ColumnDef::new(Place::Postcode).string_len(4).not_null())
                    .col(
                        ColumnDef::new(Place::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Place::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: suburb (for the suburb listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_place_suburb")
                    .table(Place::Table)
                    .col(Place::Suburb)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Place::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Place {
    Table,
    Id,
    Name,
    StreetAddress,
    Suburb,
    State,
    Postcode,
    CreatedAt,
    UpdatedAt,
}
