//! Violence category service.

use chrono::Utc;
use pedika_common::AppResult;
use pedika_db::{entities::violence_category, repositories::CategoryRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Icon URL (set by API layer after upload).
    pub image_url: Option<String>,
}

/// Input for updating a category.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryInput {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    pub image_url: Option<String>,
}

/// Violence category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self { category_repo }
    }

    /// All categories, ordered by name.
    pub async fn list(&self) -> AppResult<Vec<violence_category::Model>> {
        self.category_repo.find_all().await
    }

    /// A single category.
    pub async fn get(&self, id: i32) -> AppResult<violence_category::Model> {
        self.category_repo.get_by_id(id).await
    }

    /// Create a category.
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> AppResult<violence_category::Model> {
        input.validate()?;

        let model = violence_category::ActiveModel {
            name: Set(input.name),
            image_url: Set(input.image_url),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.category_repo.create(model).await
    }

    /// Update a category.
    pub async fn update(
        &self,
        id: i32,
        input: UpdateCategoryInput,
    ) -> AppResult<violence_category::Model> {
        input.validate()?;

        let category = self.category_repo.get_by_id(id).await?;

        let mut model: violence_category::ActiveModel = category.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(image_url) = input.image_url {
            model.image_url = Set(Some(image_url));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.category_repo.update(model).await
    }

    /// Delete a category.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        // 404 for unknown ids instead of a silent no-op delete.
        self.category_repo.get_by_id(id).await?;
        self.category_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pedika_common::AppError;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn build_service(db: &Arc<DatabaseConnection>) -> CategoryService {
        CategoryService::new(CategoryRepository::new(Arc::clone(db)))
    }

    fn mock_category(id: i32, name: &str) -> violence_category::Model {
        violence_category::Model {
            id,
            name: name.to_string(),
            image_url: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_category() {
        let created = mock_category(1, "Kekerasan Fisik");

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

        let input = CreateCategoryInput {
            name: "Kekerasan Fisik".to_string(),
            image_url: None,
        };

        let category = service.create(input).await.unwrap();
        assert_eq!(category.name, "Kekerasan Fisik");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = build_service(&db);

        let input = CreateCategoryInput {
            name: String::new(),
            image_url: None,
        };

        let result = service.create(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_category() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<violence_category::Model>::new()])
                .into_connection(),
        );
        let service = build_service(&db);

        let result = service.delete(42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
