pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_admin_role_table;
mod m20260105_000002_create_user_table;
mod m20260105_000003_create_refresh_token_table;
mod m20260106_000004_create_catalog_tables;
mod m20260106_000005_create_location_tables;
mod m20260107_000006_create_coaching_center_tables;
mod m20260107_000007_create_batch_table;
mod m20260108_000008_create_participant_table;
mod m20260109_000009_create_booking_tables;
mod m20260109_000010_create_payment_transaction_table;
mod m20260112_000011_create_content_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_admin_role_table::Migration),
            Box::new(m20260105_000002_create_user_table::Migration),
            Box::new(m20260105_000003_create_refresh_token_table::Migration),
            Box::new(m20260106_000004_create_catalog_tables::Migration),
            Box::new(m20260106_000005_create_location_tables::Migration),
            Box::new(m20260107_000006_create_coaching_center_tables::Migration),
            Box::new(m20260107_000007_create_batch_table::Migration),
            Box::new(m20260108_000008_create_participant_table::Migration),
            Box::new(m20260109_000009_create_booking_tables::Migration),
            Box::new(m20260109_000010_create_payment_transaction_table::Migration),
            Box::new(m20260112_000011_create_content_tables::Migration),
        ]
    }
}
