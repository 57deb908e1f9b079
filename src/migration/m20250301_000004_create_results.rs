//! Migration: Create results table.
//!
//! Final decisions. The foreign key makes a decision without a report impossible.

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
                CREATE TABLE IF NOT EXISTS results (
                    id INT AUTO_INCREMENT PRIMARY KEY,
                    sujet VARCHAR(255) NOT NULL,
                    nom VARCHAR(100) NULL,
                    prenom VARCHAR(100) NULL,
                    cin VARCHAR(32) NOT NULL,
                    numero_transaction VARCHAR(64) NULL,
                    statut VARCHAR(16) NOT NULL,
                    CONSTRAINT uq_results_cin_sujet UNIQUE (cin, sujet),
                    CONSTRAINT chk_results_statut CHECK (statut IN ('مقبول', 'مرفوض')),
                    CONSTRAINT fk_results_rapport FOREIGN KEY (cin, sujet)
                        REFERENCES rapport (cin, sujet)
                        ON UPDATE CASCADE
                ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS results")
            .await?;

        Ok(())
    }
}
