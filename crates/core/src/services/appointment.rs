//! Appointment service.
//!
//! Citizens book consultation slots with the agency. Every request starts
//! as `PendingApproval`; owners may edit or cancel only while pending, and
//! admins resolve pending requests by approving, rejecting or cancelling
//! them.

use chrono::{DateTime, Utc};
use pedika_common::{AppError, AppResult};
use pedika_db::{
    entities::{appointment, appointment::AppointmentStatus},
    repositories::AppointmentRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for booking an appointment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAppointmentInput {
    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    #[validate(length(min = 1, max = 2000))]
    pub purpose: String,
}

/// Input for editing a pending appointment.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAppointmentInput {
    pub start_time: Option<DateTime<Utc>>,

    pub end_time: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 2000))]
    pub purpose: Option<String>,
}

/// Input for rejecting a pending appointment.
#[derive(Debug, Deserialize, Validate)]
pub struct RejectAppointmentInput {
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

/// Appointment service for business logic.
#[derive(Clone)]
pub struct AppointmentService {
    appointment_repo: AppointmentRepository,
}

impl AppointmentService {
    /// Create a new appointment service.
    #[must_use]
    pub const fn new(appointment_repo: AppointmentRepository) -> Self {
        Self { appointment_repo }
    }

    /// Book an appointment. It starts as `PendingApproval`.
    pub async fn create(
        &self,
        user_id: i32,
        input: CreateAppointmentInput,
    ) -> AppResult<appointment::Model> {
        input.validate()?;
        validate_slot(&input.start_time, &input.end_time)?;

        let model = appointment::ActiveModel {
            user_id: Set(user_id),
            start_time: Set(input.start_time.into()),
            end_time: Set(input.end_time.into()),
            purpose: Set(input.purpose),
            status: Set(AppointmentStatus::PendingApproval),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let created = self.appointment_repo.create(model).await?;

        tracing::info!(appointment_id = created.id, user_id, "appointment booked");

        Ok(created)
    }

    /// All appointments booked by a user, newest first.
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<appointment::Model>> {
        self.appointment_repo.find_by_user(user_id).await
    }

    /// A single appointment, visible only to its owner.
    pub async fn get_for_user(&self, user_id: i32, id: i32) -> AppResult<appointment::Model> {
        let appointment = self.appointment_repo.get_by_id(id).await?;
        if appointment.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not own this appointment".to_string(),
            ));
        }
        Ok(appointment)
    }

    /// Edit an appointment. Only the owner may edit, and only while
    /// `PendingApproval`.
    pub async fn update_own(
        &self,
        user_id: i32,
        id: i32,
        input: UpdateAppointmentInput,
    ) -> AppResult<appointment::Model> {
        input.validate()?;

        let appointment = self.get_for_user(user_id, id).await?;
        if appointment.status != AppointmentStatus::PendingApproval {
            return Err(AppError::InvalidStateTransition(format!(
                "appointment can only be edited while pending approval, current status is {}",
                appointment.status
            )));
        }

        let start = input
            .start_time
            .unwrap_or_else(|| appointment.start_time.into());
        let end = input.end_time.unwrap_or_else(|| appointment.end_time.into());
        validate_slot(&start, &end)?;

        let mut model: appointment::ActiveModel = appointment.into();
        model.start_time = Set(start.into());
        model.end_time = Set(end.into());
        if let Some(purpose) = input.purpose {
            model.purpose = Set(purpose);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.appointment_repo.update(model).await
    }

    /// Cancel an appointment. Only the owner may cancel, and only while
    /// `PendingApproval`.
    pub async fn cancel_own(
        &self,
        user_id: i32,
        id: i32,
        reason: Option<String>,
    ) -> AppResult<appointment::Model> {
        let appointment = self.get_for_user(user_id, id).await?;
        if appointment.status != AppointmentStatus::PendingApproval {
            return Err(AppError::InvalidStateTransition(format!(
                "appointment cannot be cancelled from status {}",
                appointment.status
            )));
        }

        let mut model: appointment::ActiveModel = appointment.into();
        model.status = Set(AppointmentStatus::Cancelled);
        model.cancel_reason = Set(reason);
        model.updated_at = Set(Some(Utc::now().into()));

        self.appointment_repo.update(model).await
    }

    /// All appointments across users, for the admin dashboard.
    pub async fn list_all(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<appointment::Model>> {
        self.appointment_repo.find_all(limit, offset).await
    }

    /// Approve a pending appointment, recording the resolving admin.
    pub async fn approve(&self, admin_id: i32, id: i32) -> AppResult<appointment::Model> {
        let appointment = self.get_pending(id).await?;

        let mut model: appointment::ActiveModel = appointment.into();
        model.status = Set(AppointmentStatus::Approved);
        model.resolver_id = Set(Some(admin_id));
        model.updated_at = Set(Some(Utc::now().into()));

        self.appointment_repo.update(model).await
    }

    /// Reject a pending appointment, recording the resolving admin and
    /// the reason shown to the citizen.
    pub async fn reject(
        &self,
        admin_id: i32,
        id: i32,
        input: RejectAppointmentInput,
    ) -> AppResult<appointment::Model> {
        input.validate()?;

        let appointment = self.get_pending(id).await?;

        let mut model: appointment::ActiveModel = appointment.into();
        model.status = Set(AppointmentStatus::Rejected);
        model.resolver_id = Set(Some(admin_id));
        model.rejection_reason = Set(Some(input.reason));
        model.updated_at = Set(Some(Utc::now().into()));

        self.appointment_repo.update(model).await
    }

    /// Cancel a pending appointment on the agency's behalf.
    pub async fn cancel_by_admin(
        &self,
        admin_id: i32,
        id: i32,
        reason: Option<String>,
    ) -> AppResult<appointment::Model> {
        let appointment = self.get_pending(id).await?;

        let mut model: appointment::ActiveModel = appointment.into();
        model.status = Set(AppointmentStatus::Cancelled);
        model.resolver_id = Set(Some(admin_id));
        model.cancel_reason = Set(reason);
        model.updated_at = Set(Some(Utc::now().into()));

        self.appointment_repo.update(model).await
    }

    async fn get_pending(&self, id: i32) -> AppResult<appointment::Model> {
        let appointment = self.appointment_repo.get_by_id(id).await?;
        if appointment.status != AppointmentStatus::PendingApproval {
            return Err(AppError::InvalidStateTransition(format!(
                "appointment has already been resolved, current status is {}",
                appointment.status
            )));
        }
        Ok(appointment)
    }
}

fn validate_slot(start: &DateTime<Utc>, end: &DateTime<Utc>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::Validation(
            "Appointment must end after it starts".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn build_service(db: &Arc<DatabaseConnection>) -> AppointmentService {
        AppointmentService::new(AppointmentRepository::new(Arc::clone(db)))
    }

    fn mock_appointment(id: i32, status: AppointmentStatus) -> appointment::Model {
        let start = Utc::now() + Duration::days(1);
        appointment::Model {
            id,
            user_id: 7,
            start_time: start.into(),
            end_time: (start + Duration::hours(1)).into(),
            purpose: "Konsultasi pendampingan hukum".to_string(),
            status,
            resolver_id: None,
            rejection_reason: None,
            cancel_reason: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_slot() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = build_service(&db);

        let start = Utc::now() + Duration::days(1);
        let input = CreateAppointmentInput {
            start_time: start,
            end_time: start - Duration::hours(1),
            purpose: "Konsultasi pendampingan hukum".to_string(),
        };

        let result = service.create(7, input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let created = mock_appointment(1, AppointmentStatus::PendingApproval);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = build_service(&db);

        let start = Utc::now() + Duration::days(1);
        let input = CreateAppointmentInput {
            start_time: start,
            end_time: start + Duration::hours(1),
            purpose: "Konsultasi pendampingan hukum".to_string(),
        };

        let appointment = service.create(7, input).await.unwrap();
        assert_eq!(appointment.status, AppointmentStatus::PendingApproval);
        assert!(appointment.resolver_id.is_none());
    }

    #[tokio::test]
    async fn test_update_own_requires_owner() {
        let appointment = mock_appointment(1, AppointmentStatus::PendingApproval);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[appointment]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = UpdateAppointmentInput {
            start_time: None,
            end_time: None,
            purpose: Some("Konsultasi psikologis".to_string()),
        };

        let result = service.update_own(8, 1, input).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_own_only_while_pending() {
        let approved = mock_appointment(1, AppointmentStatus::Approved);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[approved]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = UpdateAppointmentInput {
            start_time: None,
            end_time: None,
            purpose: Some("Konsultasi psikologis".to_string()),
        };

        let result = service.update_own(7, 1, input).await;
        assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
    }

    #[tokio::test]
    async fn test_cancel_own_only_while_pending() {
        let rejected = mock_appointment(1, AppointmentStatus::Rejected);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[rejected]])
                .into_connection(),
        );
        let service = build_service(&db);

        let result = service.cancel_own(7, 1, None).await;
        assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
    }

    #[tokio::test]
    async fn test_approve_records_resolver() {
        let pending = mock_appointment(1, AppointmentStatus::PendingApproval);
        let mut approved = pending.clone();
        approved.status = AppointmentStatus::Approved;
        approved.resolver_id = Some(9);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[approved]])
                .into_connection(),
        );
        let service = build_service(&db);

        let appointment = service.approve(9, 1).await.unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Approved);
        assert_eq!(appointment.resolver_id, Some(9));
    }

    #[tokio::test]
    async fn test_approve_requires_pending() {
        let cancelled = mock_appointment(1, AppointmentStatus::Cancelled);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[cancelled]])
                .into_connection(),
        );
        let service = build_service(&db);

        let result = service.approve(9, 1).await;
        assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = build_service(&db);

        let input = RejectAppointmentInput {
            reason: String::new(),
        };

        let result = service.reject(9, 1, input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reject_records_reason_and_resolver() {
        let pending = mock_appointment(1, AppointmentStatus::PendingApproval);
        let mut rejected = pending.clone();
        rejected.status = AppointmentStatus::Rejected;
        rejected.resolver_id = Some(9);
        rejected.rejection_reason = Some("Jadwal konselor penuh".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[rejected]])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = RejectAppointmentInput {
            reason: "Jadwal konselor penuh".to_string(),
        };

        let appointment = service.reject(9, 1, input).await.unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Rejected);
        assert_eq!(appointment.resolver_id, Some(9));
        assert!(appointment.rejection_reason.is_some());
    }

    #[tokio::test]
    async fn test_admin_cancel_records_resolver() {
        let pending = mock_appointment(1, AppointmentStatus::PendingApproval);
        let mut cancelled = pending.clone();
        cancelled.status = AppointmentStatus::Cancelled;
        cancelled.resolver_id = Some(9);
        cancelled.cancel_reason = Some("Kantor tutup pada tanggal tersebut".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[cancelled]])
                .into_connection(),
        );
        let service = build_service(&db);

        let appointment = service
            .cancel_by_admin(9, 1, Some("Kantor tutup pada tanggal tersebut".to_string()))
            .await
            .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Cancelled);
        assert_eq!(appointment.resolver_id, Some(9));
    }
}
