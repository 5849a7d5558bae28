//! Report entity.
//!
//! A report is keyed by its registration number, not a surrogate id. The
//! number is assigned once at submission and never changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Report lifecycle status.
///
/// Forward path is `Submitted -> Viewed -> Processing`; `Cancelled` is the
/// owner-initiated terminal branch out of `Submitted`. The optional
/// viewed/processing/cancelled columns on the row record when (and by whom)
/// each transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "viewed")]
    Viewed,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl ReportStatus {
    /// Status label used in responses and transition errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Viewed => "viewed",
            Self::Processing => "processing",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "report")]
pub struct Model {
    /// Registration number, e.g. `001-DPMDPPA-III-2025`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub registration_number: String,

    /// Filing user.
    #[sea_orm(indexed)]
    pub user_id: i32,

    /// Violence category.
    #[sea_orm(indexed)]
    pub category_id: i32,

    /// When the report was filed.
    pub reported_at: DateTimeWithTimeZone,

    /// When the incident happened.
    pub incident_at: DateTimeWithTimeZone,

    /// Scene of the incident (house, workplace, school, public space, other).
    pub incident_location: String,

    /// Free-text narrative of the incident.
    #[sea_orm(column_type = "Text")]
    pub narrative: String,

    pub status: ReportStatus,

    /// Reason given by the owner on cancellation.
    #[sea_orm(nullable)]
    pub cancel_reason: Option<String>,

    /// Set when an admin first views the report.
    #[sea_orm(nullable)]
    pub viewed_at: Option<DateTimeWithTimeZone>,

    /// Admin who viewed the report.
    #[sea_orm(nullable)]
    pub viewed_by: Option<i32>,

    /// Set when an admin marks the report as being processed.
    #[sea_orm(nullable)]
    pub processing_at: Option<DateTimeWithTimeZone>,

    /// Set when the owner cancels the report.
    #[sea_orm(nullable)]
    pub cancelled_at: Option<DateTimeWithTimeZone>,

    /// Public URLs of uploaded evidence documents.
    #[sea_orm(column_type = "JsonBinary")]
    pub evidence_urls: Json,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::violence_category::Entity",
        from = "Column::CategoryId",
        to = "super::violence_category::Column::Id"
    )]
    Category,

    #[sea_orm(has_many = "super::report_tracking::Entity")]
    Tracking,

    #[sea_orm(has_many = "super::perpetrator::Entity")]
    Perpetrator,

    #[sea_orm(has_many = "super::victim::Entity")]
    Victim,

    #[sea_orm(has_one = "super::incident_address::Entity")]
    IncidentAddress,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::violence_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::report_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tracking.def()
    }
}

impl Related<super::perpetrator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Perpetrator.def()
    }
}

impl Related<super::victim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Victim.def()
    }
}

impl Related<super::incident_address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncidentAddress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
