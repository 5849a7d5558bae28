//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Actor role stored on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "masyarakat")]
    Masyarakat,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl From<Role> for pedika_common::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Masyarakat => Self::Masyarakat,
            Role::Admin => Self::Admin,
        }
    }
}

impl From<pedika_common::Role> for Role {
    fn from(role: pedika_common::Role) -> Self {
        match role {
            pedika_common::Role::Masyarakat => Self::Masyarakat,
            pedika_common::Role::Admin => Self::Admin,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub full_name: String,

    #[sea_orm(indexed)]
    pub email: String,

    /// Phone number, `08` followed by 9 to 11 digits.
    #[sea_orm(indexed)]
    pub phone: String,

    #[sea_orm(indexed)]
    pub username: String,

    /// Argon2 hash, never serialized out.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    #[sea_orm(nullable)]
    pub photo_url: Option<String>,

    #[sea_orm(nullable)]
    pub province: Option<String>,

    #[sea_orm(nullable)]
    pub city: Option<String>,

    #[sea_orm(nullable)]
    pub district: Option<String>,

    #[sea_orm(nullable)]
    pub village: Option<String>,

    #[sea_orm(nullable)]
    pub postal_code: Option<String>,

    #[sea_orm(nullable)]
    pub street: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::report::Entity")]
    Report,

    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointment,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
