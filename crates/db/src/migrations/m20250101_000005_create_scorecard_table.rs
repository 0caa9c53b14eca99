//! Create scorecard table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Scorecard::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scorecard::PlaceId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scorecard::Scores).json_binary().not_null().default("{}"))
                    .col(
                        ColumnDef::new(Scorecard::ReviewerCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Scorecard::ComputedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scorecard_place")
                            .from(Scorecard::Table, Scorecard::PlaceId)
                            .to(Place::Table, Place::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scorecard::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Scorecard {
    Table,
    PlaceId,
    Scores,
    ReviewerCount,
    ComputedAt,
}

#[derive(Iden)]
enum Place {
    Table,
    Id,
}
