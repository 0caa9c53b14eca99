//! Create feedback table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::ReviewId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::Atmosphere).boolean())
                    .col(ColumnDef::new(Feedback::Cleanliness).boolean())
                    .col(ColumnDef::new(Feedback::Decor).boolean())
                    .col(ColumnDef::new(Feedback::Drink).boolean())
                    .col(ColumnDef::new(Feedback::Entertainment).boolean())
                    .col(ColumnDef::new(Feedback::Food).boolean())
                    .col(ColumnDef::new(Feedback::Quality).boolean())
                    .col(ColumnDef::new(Feedback::Service).boolean())
                    .col(ColumnDef::new(Feedback::Speed).boolean())
                    .col(ColumnDef::new(Feedback::Value).boolean())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_review")
                            .from(Feedback::Table, Feedback::ReviewId)
                            .to(Review::Table, Review::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Feedback {
    Table,
    ReviewId,
    Atmosphere,
    Cleanliness,
    Decor,
    Drink,
    Entertainment,
    Food,
    Quality,
    Service,
    Speed,
    Value,
}

#[derive(Iden)]
enum Review {
    Table,
    Id,
}
