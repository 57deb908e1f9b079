//! Migration: Create services_utilisateur table.
//!
//! Citizen service requests with the attached-document checklist.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS services_utilisateur (
                id INT AUTO_INCREMENT PRIMARY KEY,
                sujet VARCHAR(255) NOT NULL,
                prenom VARCHAR(100) NOT NULL,
                nom VARCHAR(100) NOT NULL,
                cin VARCHAR(32) NOT NULL,
                numero_transaction VARCHAR(64) NOT NULL,
                certificat_propriete_terre BOOLEAN NOT NULL DEFAULT FALSE,
                copie_piece_identite_fermier BOOLEAN NOT NULL DEFAULT FALSE,
                copie_piece_identite_nationale BOOLEAN NOT NULL DEFAULT FALSE,
                demande_but BOOLEAN NOT NULL DEFAULT FALSE,
                copie_contrat_location_terrain BOOLEAN NOT NULL DEFAULT FALSE,
                autres_documents BOOLEAN NOT NULL DEFAULT FALSE,
                status VARCHAR(32) NOT NULL DEFAULT 'قيد الانتظار'
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
            "#,
        )
        .await?;

        // Natural-key joins against rapport/results
        conn.execute_unprepared(
            "CREATE INDEX idx_services_cin_sujet ON services_utilisateur (cin, sujet)",
        )
        .await?;

        // Public status lookup
        conn.execute_unprepared(
            "CREATE INDEX idx_services_cin_transaction ON services_utilisateur (cin, numero_transaction)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS services_utilisateur")
            .await?;

        Ok(())
    }
}
