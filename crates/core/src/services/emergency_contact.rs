//! Emergency contact service.
//!
//! The agency publishes a single hotline number citizens can call from
//! anywhere in the app.

use pedika_common::AppResult;
use pedika_db::{entities::emergency_contact, repositories::EmergencyContactRepository};

use super::user::validate_phone;

/// Emergency contact service for business logic.
#[derive(Clone)]
pub struct EmergencyContactService {
    contact_repo: EmergencyContactRepository,
}

impl EmergencyContactService {
    /// Create a new emergency contact service.
    #[must_use]
    pub const fn new(contact_repo: EmergencyContactRepository) -> Self {
        Self { contact_repo }
    }

    /// The published hotline number.
    pub async fn get(&self) -> AppResult<emergency_contact::Model> {
        self.contact_repo.get().await
    }

    /// Publish or replace the hotline number.
    pub async fn set(&self, phone: String) -> AppResult<emergency_contact::Model> {
        validate_phone(&phone)?;
        self.contact_repo.set(&phone).await
    }
}
