//! Database queries for citizen service requests.

use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, Set, Statement};

use crate::entity::service_request::{self, ActiveModel, Column, Entity as ServiceRequest};
use crate::error::{AppError, AppResult};
use crate::models::service::STATUS_PENDING;
use crate::models::{ServiceFields, ServiceWithStatus, StatusRow};

use super::{BACKEND, DbPool};

/// Services with a label derived from report presence on (cin, sujet).
pub const LIST_SERVICES_WITH_STATUS: &str = "SELECT s.id, s.sujet, s.prenom, s.nom, s.cin, \
     s.numero_transaction, s.certificat_propriete_terre, s.copie_piece_identite_fermier, \
     s.copie_piece_identite_nationale, s.demande_but, s.copie_contrat_location_terrain, \
     s.autres_documents, IF(r.id IS NOT NULL, 'تم', 'قيد الانتظار') AS status \
     FROM services_utilisateur s \
     LEFT JOIN rapport r ON s.cin = r.cin AND s.sujet = r.sujet";

/// Public lookup of a service with its report and decision.
pub const FIND_STATUS: &str = "SELECT s.id, s.sujet, s.prenom, s.nom, s.cin, \
     s.numero_transaction, res.statut, rap.id AS report_id \
     FROM services_utilisateur s \
     LEFT JOIN rapport rap ON s.cin = rap.cin AND s.sujet = rap.sujet \
     LEFT JOIN results res ON s.cin = res.cin AND s.sujet = res.sujet \
     WHERE s.cin = ? AND s.numero_transaction = ? \
     LIMIT 1";

fn active_model(fields: &ServiceFields) -> ActiveModel {
    let docs = fields.documents;
    ActiveModel {
        sujet: Set(fields.sujet.clone()),
        prenom: Set(fields.prenom.clone()),
        nom: Set(fields.nom.clone()),
        cin: Set(fields.cin.clone()),
        numero_transaction: Set(fields.numero_transaction.clone()),
        certificat_propriete_terre: Set(docs.certificat_propriete_terre),
        copie_piece_identite_fermier: Set(docs.copie_piece_identite_fermier),
        copie_piece_identite_nationale: Set(docs.copie_piece_identite_nationale),
        demande_but: Set(docs.demande_but),
        copie_contrat_location_terrain: Set(docs.copie_contrat_location_terrain),
        autres_documents: Set(docs.autres_documents),
        ..Default::default()
    }
}

impl DbPool {
    /// All services with their derived status. No pagination.
    pub async fn list_services_with_status(&self) -> AppResult<Vec<ServiceWithStatus>> {
        let rows = self
            .timed(
                "list_services",
                ServiceWithStatus::find_by_statement(Statement::from_string(
                    BACKEND,
                    LIST_SERVICES_WITH_STATUS.to_owned(),
                ))
                .all(self.connection()),
            )
            .await?;

        Ok(rows)
    }

    /// Get a service by id.
    pub async fn get_service(&self, id: i32) -> AppResult<Option<service_request::Model>> {
        let result = self
            .timed(
                "get_service",
                ServiceRequest::find_by_id(id).one(self.connection()),
            )
            .await?;

        Ok(result)
    }

    /// Insert a new service request in the pending stage.
    pub async fn insert_service(&self, fields: &ServiceFields) -> AppResult<i32> {
        let mut model = active_model(fields);
        model.status = Set(STATUS_PENDING.to_string());

        let result = self
            .timed(
                "insert_service",
                ServiceRequest::insert(model).exec(self.connection()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert service: {}", e)))?;

        Ok(result.last_insert_id)
    }

    /// Full-row update of a service. The stage marker is left untouched.
    pub async fn update_service(&self, id: i32, fields: &ServiceFields) -> AppResult<bool> {
        let result = self
            .timed(
                "update_service",
                ServiceRequest::update_many()
                    .set(active_model(fields))
                    .filter(Column::Id.eq(id))
                    .exec(self.connection()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update service: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    /// Delete a service by id.
    pub async fn delete_service(&self, id: i32) -> AppResult<bool> {
        let result = self
            .timed(
                "delete_service",
                ServiceRequest::delete_by_id(id).exec(self.connection()),
            )
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Look up a request by national id and transaction number.
    pub async fn find_status(
        &self,
        cin: &str,
        transaction_number: &str,
    ) -> AppResult<Option<StatusRow>> {
        let result = self
            .timed(
                "find_status",
                StatusRow::find_by_statement(Statement::from_sql_and_values(
                    BACKEND,
                    FIND_STATUS,
                    [cin.into(), transaction_number.into()],
                ))
                .one(self.connection()),
            )
            .await?;

        Ok(result)
    }
}
