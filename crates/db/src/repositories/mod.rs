//! Repository layer.
//!
//! Each repository wraps the shared [`sea_orm::DatabaseConnection`] and
//! exposes the queries one aggregate needs. Errors are mapped to
//! [`pedika_common::AppError`] at this boundary so callers never see
//! `DbErr` directly.

use pedika_common::AppError;
use sea_orm::{DbErr, SqlErr};

pub mod appointment;
pub mod category;
pub mod content;
pub mod emergency_contact;
pub mod event;
pub mod report;
pub mod user;

pub use appointment::AppointmentRepository;
pub use category::CategoryRepository;
pub use content::ContentRepository;
pub use emergency_contact::EmergencyContactRepository;
pub use event::EventRepository;
pub use report::ReportRepository;
pub use user::UserRepository;

/// Map an insert failure, keeping unique-constraint violations
/// distinguishable from other database errors.
pub(crate) fn map_insert_err(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::DuplicateKey(msg),
        _ => AppError::Database(e.to_string()),
    }
}
