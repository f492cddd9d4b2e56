use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Gigs {
    Table,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Bids {
    Table,
    GigId,
    CreatedAt,
}

/// Covering indexes for the two hot listings: open gigs newest-first and a
/// gig's bids newest-first.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_gigs_status_created_at")
                    .table(Gigs::Table)
                    .col(Gigs::Status)
                    .col(Gigs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bids_gig_created_at")
                    .table(Bids::Table)
                    .col(Bids::GigId)
                    .col(Bids::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_gigs_status_created_at")
                    .table(Gigs::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_bids_gig_created_at")
                    .table(Bids::Table)
                    .to_owned(),
            )
            .await
    }
}
