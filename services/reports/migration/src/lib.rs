use sea_orm_migration::prelude::*;

mod m20250101_000001_create_vehicles;
mod m20250101_000002_create_vehicle_history;
mod m20250101_000003_create_scheduled_reports;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_vehicles::Migration),
            Box::new(m20250101_000002_create_vehicle_history::Migration),
            Box::new(m20250101_000003_create_scheduled_reports::Migration),
        ]
    }

    /// Reports shares its database with auth (it reads `users`), so each
    /// migrator keeps its own history table.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_reports").into_iden()
    }
}
