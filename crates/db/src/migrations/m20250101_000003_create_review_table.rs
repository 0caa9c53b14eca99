//! Create review table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Review::PlaceId).string_len(32).not_null())
                    .col(ColumnDef::new(Review::ReviewerId).string_len(32))
                    .col(ColumnDef::new(Review::ReviewDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Review::VisitDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_place")
                            .from(Review::Table, Review::PlaceId)
                            .to(Place::Table, Place::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_reviewer")
                            .from(Review::Table, Review::ReviewerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (place_id, reviewer_id, visit_date) - latest review per reviewer
        manager
            .create_index(
                Index::create()
                    .name("idx_review_place_reviewer_visit")
                    .table(Review::Table)
                    .col(Review::PlaceId)
                    .col(Review::ReviewerId)
                    .col(Review::VisitDate)
                    .to_owned(),
            )
            .await?;

        // Index: reviewer_id (for listing a user's reviews)
        manager
            .create_index(
                Index::create()
                    .name("idx_review_reviewer_id")
                    .table(Review::Table)
                    .col(Review::ReviewerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Review {
    Table,
    Id,
    PlaceId,
    ReviewerId,
    ReviewDate,
    VisitDate,
}

#[derive(Iden)]
enum Place {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
