//! Database operations for login sessions.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::session::{self, ActiveModel, Column, Entity as Session};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Open a session for `user_id`, returning its id.
    pub async fn insert_session(&self, user_id: i32, expires_at: DateTime<Utc>) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();

        let model = ActiveModel {
            id: Set(id.clone()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            expires_at: Set(expires_at),
        };

        self.timed("insert_session", Session::insert(model).exec(self.connection()))
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert session: {}", e)))?;

        Ok(id)
    }

    /// Find a session that has not expired.
    pub async fn find_live_session(&self, id: &str) -> AppResult<Option<session::Model>> {
        let result = self
            .timed(
                "find_session",
                Session::find_by_id(id.to_string())
                    .filter(Column::ExpiresAt.gt(Utc::now()))
                    .one(self.connection()),
            )
            .await?;

        Ok(result)
    }

    /// Destroy a session. Returns whether a row was removed.
    pub async fn delete_session(&self, id: &str) -> AppResult<bool> {
        let result = self
            .timed(
                "delete_session",
                Session::delete_by_id(id.to_string()).exec(self.connection()),
            )
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Remove expired sessions. Returns the number removed.
    pub async fn purge_expired_sessions(&self) -> AppResult<u64> {
        let result = self
            .timed(
                "purge_sessions",
                Session::delete_many()
                    .filter(Column::ExpiresAt.lte(Utc::now()))
                    .exec(self.connection()),
            )
            .await?;

        Ok(result.rows_affected)
    }
}
