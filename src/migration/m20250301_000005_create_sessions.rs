//! Migration: Create sessions table.
//!
//! Server-side login sessions referenced by the signed session cookie.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id CHAR(36) PRIMARY KEY,
                user_id INT NOT NULL,
                created_at DATETIME NOT NULL,
                expires_at DATETIME NOT NULL,
                CONSTRAINT fk_sessions_user FOREIGN KEY (user_id)
                    REFERENCES utilisateur (id)
                    ON DELETE CASCADE
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
            "#,
        )
        .await?;

        conn.execute_unprepared("CREATE INDEX idx_sessions_expires_at ON sessions (expires_at)")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS sessions")
            .await?;

        Ok(())
    }
}
