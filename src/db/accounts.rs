//! Database operations for staff accounts.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::account::{self, ActiveModel, Column, Entity as Account};
use crate::error::{AppError, AppResult};
use crate::models::{AccountStatus, PendingAccount, Registration};

use super::DbPool;

impl DbPool {
    /// Find an account by email.
    pub async fn find_account_by_email(&self, email: &str) -> AppResult<Option<account::Model>> {
        let result = self
            .timed(
                "find_account_by_email",
                Account::find()
                    .filter(Column::EmailUser.eq(email))
                    .one(self.connection()),
            )
            .await?;

        Ok(result)
    }

    /// Whether an account already uses this email or national id.
    pub async fn account_exists(&self, email: &str, cin: &str) -> AppResult<bool> {
        let existing = self
            .timed(
                "account_exists",
                Account::find()
                    .filter(
                        Condition::any()
                            .add(Column::EmailUser.eq(email))
                            .add(Column::CinUser.eq(cin)),
                    )
                    .one(self.connection()),
            )
            .await?;

        Ok(existing.is_some())
    }

    /// Insert an account with an already-hashed password.
    pub async fn insert_account(
        &self,
        registration: &Registration,
        password_hash: String,
        status: AccountStatus,
    ) -> AppResult<i32> {
        let model = ActiveModel {
            email_user: Set(registration.email_user.clone()),
            password_user: Set(password_hash),
            role_user: Set(registration.role_user.as_str().to_string()),
            status_user: Set(status.as_str().to_string()),
            nom_user: Set(registration.nom_user.clone()),
            prenom_user: Set(registration.prenom_user.clone()),
            sex_user: Set(registration.sex_user.clone()),
            cin_user: Set(registration.cin_user.clone()),
            ..Default::default()
        };

        let result = self
            .timed(
                "insert_account",
                Account::insert(model).exec(self.connection()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert account: {}", e)))?;

        Ok(result.last_insert_id)
    }

    /// List accounts waiting for approval.
    pub async fn list_pending_accounts(&self) -> AppResult<Vec<PendingAccount>> {
        let models = self
            .timed(
                "list_pending_accounts",
                Account::find()
                    .filter(Column::StatusUser.eq(AccountStatus::Pending.as_str()))
                    .order_by_asc(Column::Id)
                    .all(self.connection()),
            )
            .await?;

        Ok(models
            .into_iter()
            .map(|m| PendingAccount {
                id: m.id,
                email_user: m.email_user,
                nom_user: m.nom_user,
                prenom_user: m.prenom_user,
                role_user: m.role_user,
            })
            .collect())
    }

    /// Mark an account approved. Returns whether a row changed.
    pub async fn approve_account(&self, id: i32) -> AppResult<bool> {
        let result = self
            .timed(
                "approve_account",
                Account::update_many()
                    .col_expr(
                        Column::StatusUser,
                        Expr::value(AccountStatus::Approved.as_str()),
                    )
                    .filter(Column::Id.eq(id))
                    .exec(self.connection()),
            )
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Reject an account by deleting it. Returns whether a row was removed.
    pub async fn delete_account(&self, id: i32) -> AppResult<bool> {
        let result = self
            .timed(
                "delete_account",
                Account::delete_by_id(id).exec(self.connection()),
            )
            .await?;

        Ok(result.rows_affected > 0)
    }
}
