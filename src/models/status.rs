//! Public status-check models.

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use super::lifecycle::{Stage, StageView};

/// Citizen status-check form.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CheckStatusForm {
    pub cin: Option<String>,
    pub transaction_number: Option<String>,
}

impl CheckStatusForm {
    /// Both fields, trimmed, or `None` if either is blank.
    pub fn lookup_key(&self) -> Option<(String, String)> {
        let cin = self.cin.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let number = self
            .transaction_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())?;
        Some((cin.to_string(), number.to_string()))
    }
}

/// Service matched by (cin, transaction number) with its report and decision.
#[derive(Debug, Clone, FromQueryResult)]
pub struct StatusRow {
    pub id: i32,
    pub sujet: String,
    pub prenom: String,
    pub nom: String,
    pub cin: String,
    pub numero_transaction: String,
    pub statut: Option<String>,
    pub report_id: Option<i32>,
}

/// What the status page shows.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub sujet: String,
    pub prenom: String,
    pub nom: String,
    pub numero_transaction: String,
    pub statut: Option<String>,
    pub stage: StageView,
}

impl From<StatusRow> for StatusView {
    fn from(row: StatusRow) -> Self {
        let stage = Stage::derive(row.report_id.is_some(), row.statut.as_deref());
        Self {
            sujet: row.sujet,
            prenom: row.prenom,
            nom: row.nom,
            numero_transaction: row.numero_transaction,
            statut: row.statut,
            stage: stage.into(),
        }
    }
}
