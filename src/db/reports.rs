//! Database operations for inspection reports.
//!
//! Creating a report also moves the matching service to the reported stage,
//! and deleting one cascades to its decision. Both run in a single
//! transaction.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Set,
    Statement, TransactionTrait,
};
use tracing::{info, warn};

use crate::entity::report::{self, ActiveModel, Column, Entity as Report};
use crate::error::{AppError, AppResult};
use crate::models::{NewReport, ReportDetails};

use super::{BACKEND, DbPool, abort};

pub const INSERT_REPORT: &str = "INSERT INTO rapport (cin, sujet, nom, prenom, surface, \
     limites_terrain, localisation, superficie_batiments_anciens, observations) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

pub const MARK_SERVICE_REPORTED: &str =
    "UPDATE services_utilisateur SET status = 'تم' WHERE cin = ? AND sujet = ?";

pub const SELECT_REPORT_KEY: &str = "SELECT cin, sujet FROM rapport WHERE id = ?";

pub const DELETE_RESULTS_FOR_KEY: &str = "DELETE FROM results WHERE cin = ? AND sujet = ?";

pub const DELETE_REPORT: &str = "DELETE FROM rapport WHERE id = ?";

#[derive(Debug, FromQueryResult)]
struct ReportKey {
    cin: String,
    sujet: String,
}

impl DbPool {
    /// Insert a report and mark its service as reported, atomically.
    pub async fn create_report(&self, report: &NewReport) -> AppResult<u64> {
        let txn = self.connection().begin().await?;

        let details = &report.details;
        let insert = Statement::from_sql_and_values(
            BACKEND,
            INSERT_REPORT,
            [
                report.cin.clone().into(),
                report.sujet.clone().into(),
                report.nom.clone().into(),
                report.prenom.clone().into(),
                details.surface.clone().into(),
                details.limites_terrain.clone().into(),
                details.localisation.clone().into(),
                details.superficie_batiments_anciens.clone().into(),
                details.observations.clone().into(),
            ],
        );
        let inserted = self.timed("insert_report", txn.execute_raw(insert)).await;
        let inserted = match inserted {
            Ok(result) => result,
            Err(e) => return Err(abort(txn, e).await),
        };

        let mark = Statement::from_sql_and_values(
            BACKEND,
            MARK_SERVICE_REPORTED,
            [report.cin.clone().into(), report.sujet.clone().into()],
        );
        let marked = self.timed("mark_service_reported", txn.execute_raw(mark)).await;
        if let Err(e) = marked {
            return Err(abort(txn, e).await);
        }

        txn.commit().await?;

        let id = inserted.last_insert_id();
        info!("Created report {} for cin={} sujet={}", id, report.cin, report.sujet);
        Ok(id)
    }

    /// Delete a report together with the decision sharing its key.
    ///
    /// Returns [`AppError::NotFound`] (after rolling back) when no report has
    /// this id.
    pub async fn delete_report(&self, id: i32) -> AppResult<()> {
        let txn = self.connection().begin().await?;

        let select = Statement::from_sql_and_values(BACKEND, SELECT_REPORT_KEY, [id.into()]);
        let found = self
            .timed("select_report_key", ReportKey::find_by_statement(select).one(&txn))
            .await;
        let key = match found {
            Ok(Some(key)) => key,
            Ok(None) => {
                if let Err(e) = txn.rollback().await {
                    warn!("Rollback failed for missing report {}: {}", id, e);
                }
                return Err(AppError::NotFound("Report".to_string()));
            }
            Err(e) => return Err(abort(txn, e).await),
        };

        let delete_results = Statement::from_sql_and_values(
            BACKEND,
            DELETE_RESULTS_FOR_KEY,
            [key.cin.clone().into(), key.sujet.clone().into()],
        );
        let deleted = self
            .timed("delete_results_for_report", txn.execute_raw(delete_results))
            .await;
        if let Err(e) = deleted {
            return Err(abort(txn, e).await);
        }

        let delete_report = Statement::from_sql_and_values(BACKEND, DELETE_REPORT, [id.into()]);
        let deleted = self.timed("delete_report", txn.execute_raw(delete_report)).await;
        if let Err(e) = deleted {
            return Err(abort(txn, e).await);
        }

        txn.commit().await?;

        info!("Deleted report {} (cin={} sujet={})", id, key.cin, key.sujet);
        Ok(())
    }

    /// All reports, newest first.
    pub async fn list_reports(&self) -> AppResult<Vec<report::Model>> {
        let reports = self
            .timed(
                "list_reports",
                Report::find()
                    .order_by_desc(Column::Id)
                    .all(self.connection()),
            )
            .await?;

        Ok(reports)
    }

    /// Get a report by id.
    pub async fn get_report(&self, id: i32) -> AppResult<Option<report::Model>> {
        let result = self
            .timed("get_report", Report::find_by_id(id).one(self.connection()))
            .await?;

        Ok(result)
    }

    /// Find the report attached to a service's (cin, sujet) pair.
    pub async fn find_report_by_key(&self, cin: &str, sujet: &str) -> AppResult<Option<report::Model>> {
        let result = self
            .timed(
                "find_report_by_key",
                Report::find()
                    .filter(Column::Cin.eq(cin))
                    .filter(Column::Sujet.eq(sujet))
                    .one(self.connection()),
            )
            .await?;

        Ok(result)
    }

    /// Overwrite the descriptive fields of a report. The key never changes.
    pub async fn update_report(&self, id: i32, details: ReportDetails) -> AppResult<bool> {
        let details = details.normalized();
        let model = ActiveModel {
            surface: Set(details.surface),
            limites_terrain: Set(details.limites_terrain),
            localisation: Set(details.localisation),
            superficie_batiments_anciens: Set(details.superficie_batiments_anciens),
            observations: Set(details.observations),
            ..Default::default()
        };

        let result = self
            .timed(
                "update_report",
                Report::update_many()
                    .set(model)
                    .filter(Column::Id.eq(id))
                    .exec(self.connection()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update report: {}", e)))?;

        Ok(result.rows_affected > 0)
    }
}
