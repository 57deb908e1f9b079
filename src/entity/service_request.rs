//! Citizen service request entity (`services_utilisateur` table).

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "services_utilisateur")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    /// Persisted stage marker, set to the "done" label when a report is filed
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
