//! Victim entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "victim")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub registration_number: String,

    pub name: String,

    /// National identity number.
    #[sea_orm(nullable)]
    pub nik: Option<String>,

    pub age: i32,

    pub gender: String,

    #[sea_orm(nullable)]
    pub occupation: Option<String>,

    /// Relationship to the reporting user.
    #[sea_orm(nullable)]
    pub relationship: Option<String>,

    #[sea_orm(nullable)]
    pub address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::report::Entity",
        from = "Column::RegistrationNumber",
        to = "super::report::Column::RegistrationNumber"
    )]
    Report,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
