//! Migration: Create utilisateur table.
//!
//! Staff accounts. New registrations start as `pending` until a directeur approves them.

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
                CREATE TABLE IF NOT EXISTS utilisateur (
                    id INT AUTO_INCREMENT PRIMARY KEY,
                    email_user VARCHAR(255) NOT NULL,
                    password_user VARCHAR(255) NOT NULL,
                    role_user VARCHAR(32) NOT NULL,
                    status_user VARCHAR(16) NOT NULL DEFAULT 'pending',
                    nom_user VARCHAR(100) NOT NULL,
                    prenom_user VARCHAR(100) NOT NULL,
                    sex_user VARCHAR(16) NOT NULL,
                    cin_user VARCHAR(32) NOT NULL,
                    CONSTRAINT uq_utilisateur_email UNIQUE (email_user),
                    CONSTRAINT uq_utilisateur_cin UNIQUE (cin_user),
                    CONSTRAINT chk_utilisateur_role
                        CHECK (role_user IN ('chef_dentreprise', 'gerant', 'directeur')),
                    CONSTRAINT chk_utilisateur_status
                        CHECK (status_user IN ('pending', 'approved'))
                ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS utilisateur")
            .await?;

        Ok(())
    }
}
