//! Migration: Create rapport table.
//!
//! One inspection report per (cin, sujet) pair.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS rapport (
                    id INT AUTO_INCREMENT PRIMARY KEY,
                    cin VARCHAR(32) NOT NULL,
                    sujet VARCHAR(255) NOT NULL,
                    nom VARCHAR(100) NULL,
                    prenom VARCHAR(100) NULL,
                    surface VARCHAR(255) NULL,
                    limites_terrain TEXT NULL,
                    localisation TEXT NULL,
                    superficie_batiments_anciens VARCHAR(255) NULL,
                    observations TEXT NULL,
                    CONSTRAINT uq_rapport_cin_sujet UNIQUE (cin, sujet)
                ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS rapport")
            .await?;

        Ok(())
    }
}
