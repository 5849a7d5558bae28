//! Report tracking entity.
//!
//! Progress notes appended by admins while a case is handled. Visible to
//! the report owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report_tracking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub registration_number: String,

    #[sea_orm(column_type = "Text")]
    pub note: String,

    /// Public URLs of supporting documents.
    #[sea_orm(column_type = "JsonBinary")]
    pub document_urls: Json,

    pub created_at: DateTimeWithTimeZone,
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
