//! Final decision models.

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Final accept/reject decision. Stored with its Arabic label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub const ACCEPTED_LABEL: &'static str = "مقبول";
    pub const REJECTED_LABEL: &'static str = "مرفوض";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => Self::ACCEPTED_LABEL,
            Self::Rejected => Self::REJECTED_LABEL,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            Self::ACCEPTED_LABEL => Some(Self::Accepted),
            Self::REJECTED_LABEL => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Body of `POST /updateresult`.
#[derive(Debug, Default, Deserialize)]
pub struct ResultForm {
    /// Service id, used to return to the edit page on failure
    pub id: Option<String>,
    #[serde(default)]
    pub sujet: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    #[serde(default)]
    pub cin: String,
    pub numero_transaction: Option<String>,
    pub statut: Option<String>,
}

/// Decision ready to upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    pub sujet: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub cin: String,
    pub numero_transaction: Option<String>,
    pub decision: Decision,
}

impl ResultForm {
    /// Reject anything but the two known labels before touching the database.
    pub fn validate(&self) -> AppResult<DecisionRecord> {
        let decision = self
            .statut
            .as_deref()
            .and_then(Decision::parse)
            .ok_or(AppError::InvalidStatus)?;

        Ok(DecisionRecord {
            sujet: self.sujet.clone(),
            nom: self.nom.clone(),
            prenom: self.prenom.clone(),
            cin: self.cin.clone(),
            numero_transaction: self.numero_transaction.clone(),
            decision,
        })
    }
}

/// Natural key of a decision, body of `DELETE /api/results`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResultKey {
    pub cin: String,
    pub sujet: String,
}

/// Reported service with its decision (if any), for the directeur dashboard.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct ResultRow {
    pub id: i32,
    pub sujet: String,
    pub prenom: String,
    pub nom: String,
    pub cin: String,
    pub numero_transaction: String,
    pub statut: Option<String>,
    pub report_id: i32,
}

/// Service with its decision (if any), for the edit-decision form.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct ServiceDecision {
    pub id: i32,
    pub sujet: String,
    pub prenom: String,
    pub nom: String,
    pub cin: String,
    pub numero_transaction: String,
    pub statut: Option<String>,
}
