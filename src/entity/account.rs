//! User account entity (`utilisateur` table).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "utilisateur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email_user: String,
    /// Argon2 PHC string
    pub password_user: String,
    pub role_user: String,
    pub status_user: String,
    pub nom_user: String,
    pub prenom_user: String,
    pub sex_user: String,
    #[sea_orm(unique)]
    pub cin_user: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
