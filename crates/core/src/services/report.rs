//! Report service.
//!
//! Owns the submission flow (registration number allocation plus aggregate
//! insert) and the status lifecycle `Submitted -> Viewed -> Processing`
//! with the owner-initiated `Cancelled` branch.

use chrono::{DateTime, Utc};
use pedika_common::{AppError, AppResult, RegistrationPeriod};
use pedika_db::{
    entities::{
        incident_address, perpetrator, report, report::ReportStatus, report_tracking, victim,
        violence_category,
    },
    repositories::{CategoryRepository, ReportRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::allocator::RegistrationAllocator;

/// Scene address submitted with a report.
#[derive(Debug, Deserialize, Validate)]
pub struct IncidentAddressInput {
    #[validate(length(min = 1, max = 128))]
    pub province: String,

    #[validate(length(min = 1, max = 128))]
    pub city: String,

    #[validate(length(min = 1, max = 128))]
    pub district: String,

    #[validate(length(min = 1, max = 128))]
    pub village: String,

    #[validate(length(max = 10))]
    pub postal_code: Option<String>,

    #[validate(length(max = 512))]
    pub detail: Option<String>,
}

/// A perpetrator named in a report.
#[derive(Debug, Deserialize, Validate)]
pub struct PerpetratorInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(range(min = 0, max = 150))]
    pub age: i32,

    #[validate(length(min = 1, max = 16))]
    pub gender: String,

    #[validate(length(max = 128))]
    pub occupation: Option<String>,

    #[validate(length(max = 128))]
    pub relationship: Option<String>,

    #[validate(length(max = 512))]
    pub address: Option<String>,
}

/// A victim named in a report.
#[derive(Debug, Deserialize, Validate)]
pub struct VictimInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// National identity number, 16 digits.
    #[validate(length(equal = 16))]
    pub nik: Option<String>,

    #[validate(range(min = 0, max = 150))]
    pub age: i32,

    #[validate(length(min = 1, max = 16))]
    pub gender: String,

    #[validate(length(max = 128))]
    pub occupation: Option<String>,

    #[validate(length(max = 128))]
    pub relationship: Option<String>,

    #[validate(length(max = 512))]
    pub address: Option<String>,
}

/// Input for submitting a report.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportInput {
    pub category_id: i32,

    /// When the incident happened.
    pub incident_at: DateTime<Utc>,

    /// Scene kind (house, workplace, school, public space, other).
    #[validate(length(min = 1, max = 128))]
    pub incident_location: String,

    #[validate(length(min = 10, max = 10_000))]
    pub narrative: String,

    #[validate(nested)]
    pub address: IncidentAddressInput,

    pub perpetrators: Vec<PerpetratorInput>,

    pub victims: Vec<VictimInput>,

    /// Public URLs of already-uploaded evidence files.
    #[serde(default)]
    pub evidence_urls: Vec<String>,
}

/// Input for editing a submitted report.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReportInput {
    pub category_id: Option<i32>,

    pub incident_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 128))]
    pub incident_location: Option<String>,

    #[validate(length(min = 10, max = 10_000))]
    pub narrative: Option<String>,
}

/// Input for appending a tracking entry.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrackingInput {
    #[validate(length(min = 1, max = 2000))]
    pub note: String,

    /// Public URLs of already-uploaded supporting documents.
    #[serde(default)]
    pub document_urls: Vec<String>,
}

/// A report with all of its children resolved.
#[derive(Debug, Serialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: report::Model,
    pub category: Option<violence_category::Model>,
    pub incident_address: Option<incident_address::Model>,
    pub perpetrators: Vec<perpetrator::Model>,
    pub victims: Vec<victim::Model>,
    pub trackings: Vec<report_tracking::Model>,
}

/// Report service for business logic.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    category_repo: CategoryRepository,
    allocator: RegistrationAllocator,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        category_repo: CategoryRepository,
        allocator: RegistrationAllocator,
    ) -> Self {
        Self {
            report_repo,
            category_repo,
            allocator,
        }
    }

    /// Submit a new report.
    ///
    /// Allocates a registration number for the current period and inserts
    /// the report with its children. A duplicate-key insert (another
    /// instance winning the same number) triggers exactly one
    /// re-allocation before giving up.
    pub async fn submit(
        &self,
        user_id: i32,
        input: CreateReportInput,
    ) -> AppResult<report::Model> {
        input.validate()?;
        for p in &input.perpetrators {
            p.validate()?;
        }
        for v in &input.victims {
            v.validate()?;
        }

        // Reject unknown categories before burning a sequence number.
        self.category_repo.get_by_id(input.category_id).await?;

        let now = Utc::now();
        let period = RegistrationPeriod::for_date(&now)?;

        let mut reallocated = false;
        let created = loop {
            let registration_number = self.allocator.allocate(&period).await?;

            let model = report::ActiveModel {
                registration_number: Set(registration_number.clone()),
                user_id: Set(user_id),
                category_id: Set(input.category_id),
                reported_at: Set(now.into()),
                incident_at: Set(input.incident_at.into()),
                incident_location: Set(input.incident_location.clone()),
                narrative: Set(input.narrative.clone()),
                status: Set(ReportStatus::Submitted),
                evidence_urls: Set(serde_json::json!(input.evidence_urls)),
                created_at: Set(now.into()),
                ..Default::default()
            };

            match self.report_repo.create(model).await {
                Ok(report) => break report,
                Err(AppError::DuplicateKey(_)) if !reallocated => {
                    reallocated = true;
                    tracing::warn!(
                        registration_number = %registration_number,
                        "registration number collided on insert, reallocating"
                    );
                }
                Err(e) => return Err(e),
            }
        };

        let address = incident_address::ActiveModel {
            registration_number: Set(created.registration_number.clone()),
            province: Set(input.address.province),
            city: Set(input.address.city),
            district: Set(input.address.district),
            village: Set(input.address.village),
            postal_code: Set(input.address.postal_code),
            detail: Set(input.address.detail),
            ..Default::default()
        };
        self.report_repo.insert_address(address).await?;

        let perpetrators = input
            .perpetrators
            .into_iter()
            .map(|p| perpetrator::ActiveModel {
                registration_number: Set(created.registration_number.clone()),
                name: Set(p.name),
                age: Set(p.age),
                gender: Set(p.gender),
                occupation: Set(p.occupation),
                relationship: Set(p.relationship),
                address: Set(p.address),
                ..Default::default()
            })
            .collect();
        self.report_repo.insert_perpetrators(perpetrators).await?;

        let victims = input
            .victims
            .into_iter()
            .map(|v| victim::ActiveModel {
                registration_number: Set(created.registration_number.clone()),
                name: Set(v.name),
                nik: Set(v.nik),
                age: Set(v.age),
                gender: Set(v.gender),
                occupation: Set(v.occupation),
                relationship: Set(v.relationship),
                address: Set(v.address),
                ..Default::default()
            })
            .collect();
        self.report_repo.insert_victims(victims).await?;

        tracing::info!(
            registration_number = %created.registration_number,
            user_id,
            "report submitted"
        );

        Ok(created)
    }

    /// All reports filed by a user, newest first.
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_by_user(user_id).await
    }

    /// Full aggregate for the owning citizen, tracking history included.
    pub async fn detail_for_owner(
        &self,
        user_id: i32,
        registration_number: &str,
    ) -> AppResult<ReportDetail> {
        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;
        if report.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not own this report".to_string(),
            ));
        }
        self.load_detail(report).await
    }

    /// Edit a report. Only the owner may edit, and only while `Submitted`.
    pub async fn update_own(
        &self,
        user_id: i32,
        registration_number: &str,
        input: UpdateReportInput,
    ) -> AppResult<report::Model> {
        input.validate()?;

        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;
        if report.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not own this report".to_string(),
            ));
        }
        if report.status != ReportStatus::Submitted {
            return Err(AppError::InvalidStateTransition(format!(
                "report can only be edited while submitted, current status is {}",
                report.status
            )));
        }

        if let Some(category_id) = input.category_id {
            self.category_repo.get_by_id(category_id).await?;
        }

        let mut model: report::ActiveModel = report.into();
        if let Some(category_id) = input.category_id {
            model.category_id = Set(category_id);
        }
        if let Some(incident_at) = input.incident_at {
            model.incident_at = Set(incident_at.into());
        }
        if let Some(incident_location) = input.incident_location {
            model.incident_location = Set(incident_location);
        }
        if let Some(narrative) = input.narrative {
            model.narrative = Set(narrative);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.report_repo.update(model).await
    }

    /// Cancel a report. Only the owner may cancel, and only while
    /// `Submitted`.
    pub async fn cancel_own(
        &self,
        user_id: i32,
        registration_number: &str,
        reason: String,
    ) -> AppResult<report::Model> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation(
                "Cancellation reason is required".to_string(),
            ));
        }

        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;
        if report.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not own this report".to_string(),
            ));
        }
        if report.status != ReportStatus::Submitted {
            return Err(AppError::InvalidStateTransition(format!(
                "report cannot be cancelled from status {}",
                report.status
            )));
        }

        let now = Utc::now();
        let mut model: report::ActiveModel = report.into();
        model.status = Set(ReportStatus::Cancelled);
        model.cancel_reason = Set(Some(reason.to_string()));
        model.cancelled_at = Set(Some(now.into()));
        model.updated_at = Set(Some(now.into()));

        self.report_repo.update(model).await
    }

    /// The latest reports across all users, for the admin dashboard.
    pub async fn latest(&self, limit: u64) -> AppResult<Vec<report::Model>> {
        self.report_repo.find_latest(limit).await
    }

    /// Full aggregate for an admin.
    ///
    /// Opening a submitted (or already viewed) report records the viewing
    /// admin and timestamp; reports further down the lifecycle are
    /// returned untouched.
    pub async fn admin_detail(
        &self,
        admin_id: i32,
        registration_number: &str,
    ) -> AppResult<ReportDetail> {
        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;

        let report = match report.status {
            ReportStatus::Submitted | ReportStatus::Viewed => {
                self.record_view(report, admin_id).await?
            }
            _ => report,
        };

        self.load_detail(report).await
    }

    /// Record that an admin viewed a report.
    ///
    /// Permitted from `Submitted` and (re-entrantly) from `Viewed`; a
    /// report already `Processing` or `Cancelled` cannot move back.
    pub async fn mark_viewed(
        &self,
        admin_id: i32,
        registration_number: &str,
    ) -> AppResult<report::Model> {
        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;

        match report.status {
            ReportStatus::Submitted | ReportStatus::Viewed => {
                self.record_view(report, admin_id).await
            }
            status => Err(AppError::InvalidStateTransition(format!(
                "report cannot move from {status} to viewed"
            ))),
        }
    }

    /// Move a viewed report into processing.
    pub async fn mark_processing(&self, registration_number: &str) -> AppResult<report::Model> {
        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;

        if report.status != ReportStatus::Viewed {
            return Err(AppError::InvalidStateTransition(format!(
                "report cannot move from {} to processing",
                report.status
            )));
        }

        let now = Utc::now();
        let mut model: report::ActiveModel = report.into();
        model.status = Set(ReportStatus::Processing);
        model.processing_at = Set(Some(now.into()));
        model.updated_at = Set(Some(now.into()));

        self.report_repo.update(model).await
    }

    /// Append a handling-progress entry to a report.
    pub async fn add_tracking(
        &self,
        registration_number: &str,
        input: CreateTrackingInput,
    ) -> AppResult<report_tracking::Model> {
        input.validate()?;

        // The report must exist; tracking rows carry its number.
        let report = self
            .report_repo
            .get_by_registration_number(registration_number)
            .await?;

        let model = report_tracking::ActiveModel {
            registration_number: Set(report.registration_number),
            note: Set(input.note),
            document_urls: Set(serde_json::json!(input.document_urls)),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.report_repo.insert_tracking(model).await
    }

    async fn record_view(
        &self,
        report: report::Model,
        admin_id: i32,
    ) -> AppResult<report::Model> {
        let now = Utc::now();
        let mut model: report::ActiveModel = report.into();
        model.status = Set(ReportStatus::Viewed);
        model.viewed_by = Set(Some(admin_id));
        model.viewed_at = Set(Some(now.into()));
        model.updated_at = Set(Some(now.into()));

        self.report_repo.update(model).await
    }

    async fn load_detail(&self, report: report::Model) -> AppResult<ReportDetail> {
        let registration_number = report.registration_number.clone();

        let category = self.category_repo.find_by_id(report.category_id).await?;
        let incident_address = self.report_repo.find_address(&registration_number).await?;
        let perpetrators = self
            .report_repo
            .find_perpetrators(&registration_number)
            .await?;
        let victims = self.report_repo.find_victims(&registration_number).await?;
        let trackings = self.report_repo.find_tracking(&registration_number).await?;

        Ok(ReportDetail {
            report,
            category,
            incident_address,
            perpetrators,
            victims,
            trackings,
        })
    }
}
