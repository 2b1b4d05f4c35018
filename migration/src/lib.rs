pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_app_user_table;
mod m20251101_000002_create_planet_table;
mod m20251101_000003_create_planet_system_table;
mod m20251101_000004_create_temperature_request_table;

pub use m20251101_000003_create_planet_system_table::one_draft_per_user_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_app_user_table::Migration),
            Box::new(m20251101_000002_create_planet_table::Migration),
            Box::new(m20251101_000003_create_planet_system_table::Migration),
            Box::new(m20251101_000004_create_temperature_request_table::Migration),
        ]
    }
}
