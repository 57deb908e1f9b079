//! Inspection report models.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Blank form inputs are stored as NULL.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// New-report form.
#[derive(Debug, Default, Deserialize)]
pub struct ReportForm {
    pub cin: Option<String>,
    pub sujet: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub surface: Option<String>,
    pub limites_terrain: Option<String>,
    pub localisation: Option<String>,
    pub superficie_batiments_anciens: Option<String>,
    pub observations: Option<String>,
}

/// Descriptive report fields editable after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReportDetails {
    pub surface: Option<String>,
    pub limites_terrain: Option<String>,
    pub localisation: Option<String>,
    pub superficie_batiments_anciens: Option<String>,
    pub observations: Option<String>,
}

impl ReportDetails {
    /// Normalize blank inputs to `None`.
    pub fn normalized(self) -> Self {
        Self {
            surface: optional(self.surface),
            limites_terrain: optional(self.limites_terrain),
            localisation: optional(self.localisation),
            superficie_batiments_anciens: optional(self.superficie_batiments_anciens),
            observations: optional(self.observations),
        }
    }
}

/// Report ready for insertion, keyed by the (cin, sujet) pair of its service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub cin: String,
    pub sujet: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub details: ReportDetails,
}

impl ReportForm {
    /// Both halves of the natural key are required.
    pub fn validate(self) -> AppResult<NewReport> {
        let cin = optional(self.cin).ok_or(AppError::MissingRequiredFields)?;
        let sujet = optional(self.sujet).ok_or(AppError::MissingRequiredFields)?;

        Ok(NewReport {
            cin,
            sujet,
            nom: optional(self.nom),
            prenom: optional(self.prenom),
            details: ReportDetails {
                surface: self.surface,
                limites_terrain: self.limites_terrain,
                localisation: self.localisation,
                superficie_batiments_anciens: self.superficie_batiments_anciens,
                observations: self.observations,
            }
            .normalized(),
        })
    }
}

/// Query string of `/viewreport`.
#[derive(Debug, Deserialize)]
pub struct ReportKeyQuery {
    pub cin: Option<String>,
    pub sujet: Option<String>,
}
