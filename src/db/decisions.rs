//! Database operations for final decisions (the `results` table).

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter, Statement};
use tracing::info;

use crate::entity::decision::{Column, Entity as DecisionEntity};
use crate::error::{AppError, AppResult};
use crate::models::{DecisionRecord, ResultRow, ServiceDecision};

use super::{BACKEND, DbPool};

/// Reported services with their decision, newest service first.
pub const LIST_RESULTS: &str = "SELECT s.id, s.sujet, s.prenom, s.nom, s.cin, \
     s.numero_transaction, res.statut, rap.id AS report_id \
     FROM services_utilisateur s \
     INNER JOIN rapport rap ON s.cin = rap.cin AND s.sujet = rap.sujet \
     LEFT JOIN results res ON s.cin = res.cin AND s.sujet = res.sujet \
     ORDER BY s.id DESC";

pub const SERVICE_DECISION: &str = "SELECT s.id, s.sujet, s.prenom, s.nom, s.cin, \
     s.numero_transaction, res.statut \
     FROM services_utilisateur s \
     LEFT JOIN results res ON s.cin = res.cin AND s.sujet = res.sujet \
     WHERE s.id = ?";

/// At most one decision per (cin, sujet); a second one overwrites the status.
pub const UPSERT_RESULT: &str = "INSERT INTO results (sujet, nom, prenom, cin, \
     numero_transaction, statut) VALUES (?, ?, ?, ?, ?, ?) \
     ON DUPLICATE KEY UPDATE statut = ?";

impl DbPool {
    pub async fn list_results(&self) -> AppResult<Vec<ResultRow>> {
        let rows = self
            .timed(
                "list_results",
                ResultRow::find_by_statement(Statement::from_string(
                    BACKEND,
                    LIST_RESULTS.to_owned(),
                ))
                .all(self.connection()),
            )
            .await?;

        Ok(rows)
    }

    /// A service with its current decision, if any.
    pub async fn get_service_decision(&self, id: i32) -> AppResult<Option<ServiceDecision>> {
        let result = self
            .timed(
                "get_service_decision",
                ServiceDecision::find_by_statement(Statement::from_sql_and_values(
                    BACKEND,
                    SERVICE_DECISION,
                    [id.into()],
                ))
                .one(self.connection()),
            )
            .await?;

        Ok(result)
    }

    /// Record or overwrite the decision for a (cin, sujet) pair.
    pub async fn upsert_decision(&self, record: &DecisionRecord) -> AppResult<()> {
        let statut = record.decision.as_str();
        let stmt = Statement::from_sql_and_values(
            BACKEND,
            UPSERT_RESULT,
            [
                record.sujet.clone().into(),
                record.nom.clone().into(),
                record.prenom.clone().into(),
                record.cin.clone().into(),
                record.numero_transaction.clone().into(),
                statut.into(),
                statut.into(),
            ],
        );

        self.timed("upsert_result", self.connection().execute_raw(stmt))
            .await
            .map_err(|e| AppError::Database(format!("Failed to save decision: {}", e)))?;

        info!(
            "Recorded decision '{}' for cin={} sujet={}",
            statut, record.cin, record.sujet
        );
        Ok(())
    }

    /// Delete the decision for a (cin, sujet) pair. Returns whether a row was removed.
    pub async fn delete_decision(&self, cin: &str, sujet: &str) -> AppResult<bool> {
        let result = self
            .timed(
                "delete_result",
                DecisionEntity::delete_many()
                    .filter(Column::Cin.eq(cin))
                    .filter(Column::Sujet.eq(sujet))
                    .exec(self.connection()),
            )
            .await?;

        Ok(result.rows_affected > 0)
    }
}
