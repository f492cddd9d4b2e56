pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users_table;
mod m20260110_000002_create_gigs_table;
mod m20260110_000003_create_bids_table;
mod m20260112_000001_add_unique_gig_freelancer_to_bids;
mod m20260115_000001_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users_table::Migration),
            Box::new(m20260110_000002_create_gigs_table::Migration),
            Box::new(m20260110_000003_create_bids_table::Migration),
            Box::new(m20260112_000001_add_unique_gig_freelancer_to_bids::Migration),
            Box::new(m20260115_000001_add_listing_indexes::Migration),
        ]
    }
}
