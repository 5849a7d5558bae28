//! Report repository.
//!
//! Covers the report row itself plus its child tables: incident address,
//! perpetrators, victims and tracking entries. Children are keyed by the
//! report's registration number.

use std::sync::Arc;

use crate::entities::{
    IncidentAddress, Perpetrator, Report, ReportTracking, Victim, incident_address, perpetrator,
    report, report_tracking, victim,
};
use pedika_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::map_insert_err;

/// Repository for report aggregates.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Count reports carrying the given registration number (0 or 1).
    pub async fn count_by_registration_number(&self, registration_number: &str) -> AppResult<u64> {
        Report::find()
            .filter(report::Column::RegistrationNumber.eq(registration_number))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new report row.
    ///
    /// A unique-constraint violation on the registration number surfaces as
    /// [`AppError::DuplicateKey`], which callers treat as retryable.
    pub async fn create(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_insert_err)
    }

    /// Find a report by registration number.
    pub async fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> AppResult<Option<report::Model>> {
        Report::find_by_id(registration_number)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a report by registration number, returning an error if not found.
    pub async fn get_by_registration_number(
        &self,
        registration_number: &str,
    ) -> AppResult<report::Model> {
        self.find_by_registration_number(registration_number)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {registration_number} not found")))
    }

    /// Find all reports filed by a user, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<report::Model>> {
        Report::find()
            .filter(report::Column::UserId.eq(user_id))
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the latest reports across all users, newest first.
    pub async fn find_latest(&self, limit: u64) -> AppResult<Vec<report::Model>> {
        Report::find()
            .order_by_desc(report::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a report row.
    pub async fn update(&self, model: report::ActiveModel) -> AppResult<report::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert the incident address for a report.
    pub async fn insert_address(
        &self,
        model: incident_address::ActiveModel,
    ) -> AppResult<incident_address::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_insert_err)
    }

    /// Find the incident address attached to a report.
    pub async fn find_address(
        &self,
        registration_number: &str,
    ) -> AppResult<Option<incident_address::Model>> {
        IncidentAddress::find()
            .filter(incident_address::Column::RegistrationNumber.eq(registration_number))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert perpetrator rows for a report.
    pub async fn insert_perpetrators(
        &self,
        models: Vec<perpetrator::ActiveModel>,
    ) -> AppResult<Vec<perpetrator::Model>> {
        let mut inserted = Vec::with_capacity(models.len());
        for model in models {
            inserted.push(model.insert(self.db.as_ref()).await.map_err(map_insert_err)?);
        }
        Ok(inserted)
    }

    /// Find all perpetrators named in a report.
    pub async fn find_perpetrators(
        &self,
        registration_number: &str,
    ) -> AppResult<Vec<perpetrator::Model>> {
        Perpetrator::find()
            .filter(perpetrator::Column::RegistrationNumber.eq(registration_number))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert victim rows for a report.
    pub async fn insert_victims(
        &self,
        models: Vec<victim::ActiveModel>,
    ) -> AppResult<Vec<victim::Model>> {
        let mut inserted = Vec::with_capacity(models.len());
        for model in models {
            inserted.push(model.insert(self.db.as_ref()).await.map_err(map_insert_err)?);
        }
        Ok(inserted)
    }

    /// Find all victims named in a report.
    pub async fn find_victims(&self, registration_number: &str) -> AppResult<Vec<victim::Model>> {
        Victim::find()
            .filter(victim::Column::RegistrationNumber.eq(registration_number))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Append a tracking entry to a report.
    pub async fn insert_tracking(
        &self,
        model: report_tracking::ActiveModel,
    ) -> AppResult<report_tracking::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_insert_err)
    }

    /// Find all tracking entries for a report, oldest first.
    pub async fn find_tracking(
        &self,
        registration_number: &str,
    ) -> AppResult<Vec<report_tracking::Model>> {
        ReportTracking::find()
            .filter(report_tracking::Column::RegistrationNumber.eq(registration_number))
            .order_by_asc(report_tracking::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
