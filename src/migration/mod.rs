//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_utilisateur;
mod m20250301_000002_create_services_utilisateur;
mod m20250301_000003_create_rapport;
mod m20250301_000004_create_results;
mod m20250301_000005_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_utilisateur::Migration),
            Box::new(m20250301_000002_create_services_utilisateur::Migration),
            Box::new(m20250301_000003_create_rapport::Migration),
            Box::new(m20250301_000004_create_results::Migration),
            Box::new(m20250301_000005_create_sessions::Migration),
        ]
    }
}
