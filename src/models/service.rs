//! Service request models.

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// Status label of a request without a report.
pub const STATUS_PENDING: &str = "قيد الانتظار";
/// Status label of a request whose report has been filed.
pub const STATUS_DONE: &str = "تم";

/// Checkbox semantics: a ticked box submits `true` (or the browser default
/// `on`), an unticked one submits nothing.
pub fn checkbox(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("true") | Some("on"))
}

/// Service create/update form.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceForm {
    #[serde(default)]
    pub sujet: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub cin: String,
    #[serde(default)]
    pub numero_transaction: String,
    pub certificat_propriete_terre: Option<String>,
    pub copie_piece_identite_fermier: Option<String>,
    pub copie_piece_identite_nationale: Option<String>,
    pub demande_but: Option<String>,
    pub copie_contrat_location_terrain: Option<String>,
    pub autres_documents: Option<String>,
}

/// Attached-document checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentFlags {
    pub certificat_propriete_terre: bool,
    pub copie_piece_identite_fermier: bool,
    pub copie_piece_identite_nationale: bool,
    pub demande_but: bool,
    pub copie_contrat_location_terrain: bool,
    pub autres_documents: bool,
}

/// Service fields after checkbox coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFields {
    pub sujet: String,
    pub prenom: String,
    pub nom: String,
    pub cin: String,
    pub numero_transaction: String,
    pub documents: DocumentFlags,
}

impl From<ServiceForm> for ServiceFields {
    fn from(form: ServiceForm) -> Self {
        let documents = DocumentFlags {
            certificat_propriete_terre: checkbox(&form.certificat_propriete_terre),
            copie_piece_identite_fermier: checkbox(&form.copie_piece_identite_fermier),
            copie_piece_identite_nationale: checkbox(&form.copie_piece_identite_nationale),
            demande_but: checkbox(&form.demande_but),
            copie_contrat_location_terrain: checkbox(&form.copie_contrat_location_terrain),
            autres_documents: checkbox(&form.autres_documents),
        };

        Self {
            sujet: form.sujet.trim().to_string(),
            prenom: form.prenom.trim().to_string(),
            nom: form.nom.trim().to_string(),
            cin: form.cin.trim().to_string(),
            numero_transaction: form.numero_transaction.trim().to_string(),
            documents,
        }
    }
}

/// Service row joined with its report presence, for the chef dashboard.
#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct ServiceWithStatus {
    pub id: i32,
    pub sujet: String,
    pub prenom: String,
    pub nom: String,
    pub cin: String,
    pub numero_transaction: String,
    pub certificat_propriete_terre: bool,
    pub copie_piece_identite_fermier: bool,
    pub copie_piece_identite_nationale: bool,
    pub demande_but: bool,
    pub copie_contrat_location_terrain: bool,
    pub autres_documents: bool,
    /// `تم` when a report exists, `قيد الانتظار` otherwise
    pub status: String,
}
