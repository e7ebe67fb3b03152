pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_catalog_tables;
mod m20250601_000003_create_courts_tables;
mod m20250601_000004_create_bookings_tables;
mod m20250601_000005_create_pendapatan_table;
mod m20250601_000006_create_reviews_table;
mod m20250601_000007_create_activity_logs_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_catalog_tables::Migration),
            Box::new(m20250601_000003_create_courts_tables::Migration),
            Box::new(m20250601_000004_create_bookings_tables::Migration),
            Box::new(m20250601_000005_create_pendapatan_table::Migration),
            Box::new(m20250601_000006_create_reviews_table::Migration),
            Box::new(m20250601_000007_create_activity_logs_table::Migration),
        ]
    }
}
