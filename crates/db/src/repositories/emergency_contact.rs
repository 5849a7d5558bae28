//! Emergency contact repository.

use std::sync::Arc;

use crate::entities::{EmergencyContact, emergency_contact};
use pedika_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Singleton ID for the emergency contact row.
pub const EMERGENCY_CONTACT_ID: i32 = 1;

/// Repository for the hotline number shown to the public.
#[derive(Clone)]
pub struct EmergencyContactRepository {
    db: Arc<DatabaseConnection>,
}

impl EmergencyContactRepository {
    /// Create a new emergency contact repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the current contact.
    pub async fn find(&self) -> AppResult<Option<emergency_contact::Model>> {
        EmergencyContact::find()
            .filter(emergency_contact::Column::Id.eq(EMERGENCY_CONTACT_ID))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the current contact, returning an error if none is set.
    pub async fn get(&self) -> AppResult<emergency_contact::Model> {
        self.find()
            .await?
            .ok_or_else(|| AppError::NotFound("emergency contact not set".to_string()))
    }

    /// Set the contact phone, inserting the row on first use.
    pub async fn set(&self, phone: &str) -> AppResult<emergency_contact::Model> {
        let now = chrono::Utc::now();

        if self.find().await?.is_some() {
            let model = emergency_contact::ActiveModel {
                id: Set(EMERGENCY_CONTACT_ID),
                phone: Set(phone.to_string()),
                updated_at: Set(now.into()),
            };
            return model
                .update(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()));
        }

        let model = emergency_contact::ActiveModel {
            id: Set(EMERGENCY_CONTACT_ID),
            phone: Set(phone.to_string()),
            updated_at: Set(now.into()),
        };
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_contact(phone: &str) -> emergency_contact::Model {
        emergency_contact::Model {
            id: EMERGENCY_CONTACT_ID,
            phone: phone.to_string(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_not_set() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<emergency_contact::Model>::new()])
                .into_connection(),
        );

        let repo = EmergencyContactRepository::new(db);
        let result = repo.get().await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_inserts_first_contact() {
        let contact = create_test_contact("081122334455");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<emergency_contact::Model>::new()])
                .append_query_results([[contact.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = EmergencyContactRepository::new(db);
        let result = repo.set("081122334455").await.unwrap();

        assert_eq!(result.phone, "081122334455");
    }

    #[tokio::test]
    async fn test_set_updates_existing_contact() {
        let existing = create_test_contact("081122334455");
        let updated = create_test_contact("089988776655");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_query_results([[updated.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = EmergencyContactRepository::new(db);
        let result = repo.set("089988776655").await.unwrap();

        assert_eq!(result.phone, "089988776655");
    }
}
