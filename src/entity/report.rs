//! Inspection report entity (`rapport` table).

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "rapport")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cin: String,
    pub sujet: String,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub surface: Option<String>,
    pub limites_terrain: Option<String>,
    pub localisation: Option<String>,
    pub superficie_batiments_anciens: Option<String>,
    pub observations: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
