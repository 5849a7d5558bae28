//! Appointment repository.

use std::sync::Arc;

use crate::entities::{Appointment, appointment};
use pedika_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::map_insert_err;

/// Repository for appointment operations.
#[derive(Clone)]
pub struct AppointmentRepository {
    db: Arc<DatabaseConnection>,
}

impl AppointmentRepository {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a new appointment.
    pub async fn create(&self, model: appointment::ActiveModel) -> AppResult<appointment::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_insert_err)
    }

    /// Find an appointment by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<appointment::Model>> {
        Appointment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an appointment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<appointment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("appointment {id} not found")))
    }

    /// Find all appointments requested by a user, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<appointment::Model>> {
        Appointment::find()
            .filter(appointment::Column::UserId.eq(user_id))
            .order_by_desc(appointment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all appointments across users, newest first.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<appointment::Model>> {
        Appointment::find()
            .order_by_desc(appointment::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an appointment.
    pub async fn update(&self, model: appointment::ActiveModel) -> AppResult<appointment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::appointment::AppointmentStatus;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    fn create_test_appointment(id: i32, user_id: i32) -> appointment::Model {
        let start = Utc::now() + Duration::days(3);
        appointment::Model {
            id,
            user_id,
            start_time: start.into(),
            end_time: (start + Duration::hours(1)).into(),
            purpose: "Konsultasi pendampingan hukum".to_string(),
            status: AppointmentStatus::PendingApproval,
            resolver_id: None,
            rejection_reason: None,
            cancel_reason: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_appointment() {
        let appointment = create_test_appointment(1, 7);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[appointment.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AppointmentRepository::new(db);

        let active = appointment::ActiveModel {
            user_id: Set(7),
            start_time: Set(appointment.start_time),
            end_time: Set(appointment.end_time),
            purpose: Set("Konsultasi pendampingan hukum".to_string()),
            status: Set(AppointmentStatus::PendingApproval),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.user_id, 7);
        assert_eq!(result.status, AppointmentStatus::PendingApproval);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<appointment::Model>::new()])
                .into_connection(),
        );

        let repo = AppointmentRepository::new(db);
        let result = repo.get_by_id(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let a1 = create_test_appointment(1, 7);
        let a2 = create_test_appointment(2, 7);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a1, a2]])
                .into_connection(),
        );

        let repo = AppointmentRepository::new(db);
        let result = repo.find_by_user(7).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_paginated() {
        let a1 = create_test_appointment(1, 7);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a1]])
                .into_connection(),
        );

        let repo = AppointmentRepository::new(db);
        let result = repo.find_all(20, 0).await.unwrap();

        assert_eq!(result.len(), 1);
    }
}
