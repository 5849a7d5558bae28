//! Incident address entity.
//!
//! At most one address row per report.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incident_address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub registration_number: String,

    pub province: String,

    pub city: String,

    pub district: String,

    pub village: String,

    #[sea_orm(nullable)]
    pub postal_code: Option<String>,

    /// Street-level detail of the scene.
    #[sea_orm(nullable)]
    pub detail: Option<String>,
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
