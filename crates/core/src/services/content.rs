//! Published content service.
//!
//! Articles and announcements written by admins for the public landing
//! pages.

use chrono::Utc;
use pedika_common::AppResult;
use pedika_db::{entities::content, repositories::ContentRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Default page size for content listings.
const DEFAULT_PAGE_SIZE: u64 = 20;

/// Input for publishing content.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContentInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 50_000))]
    pub body: String,

    /// Cover image URL (set by API layer after upload).
    pub image_url: Option<String>,
}

/// Input for editing content.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateContentInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 50_000))]
    pub body: Option<String>,

    pub image_url: Option<String>,
}

/// Content service for business logic.
#[derive(Clone)]
pub struct ContentService {
    content_repo: ContentRepository,
}

impl ContentService {
    /// Create a new content service.
    #[must_use]
    pub const fn new(content_repo: ContentRepository) -> Self {
        Self { content_repo }
    }

    /// Published content, newest first.
    pub async fn list(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> AppResult<Vec<content::Model>> {
        self.content_repo
            .find_all(limit.unwrap_or(DEFAULT_PAGE_SIZE), offset.unwrap_or(0))
            .await
    }

    /// A single content item.
    pub async fn get(&self, id: i32) -> AppResult<content::Model> {
        self.content_repo.get_by_id(id).await
    }

    /// Publish a content item.
    pub async fn create(
        &self,
        author_id: i32,
        input: CreateContentInput,
    ) -> AppResult<content::Model> {
        input.validate()?;

        let model = content::ActiveModel {
            title: Set(input.title),
            body: Set(input.body),
            image_url: Set(input.image_url),
            author_id: Set(author_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.content_repo.create(model).await
    }

    /// Edit a content item.
    pub async fn update(&self, id: i32, input: UpdateContentInput) -> AppResult<content::Model> {
        input.validate()?;

        let content = self.content_repo.get_by_id(id).await?;

        let mut model: content::ActiveModel = content.into();
        if let Some(title) = input.title {
            model.title = Set(title);
        }
        if let Some(body) = input.body {
            model.body = Set(body);
        }
        if let Some(image_url) = input.image_url {
            model.image_url = Set(Some(image_url));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.content_repo.update(model).await
    }

    /// Delete a content item.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.content_repo.get_by_id(id).await?;
        self.content_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pedika_common::AppError;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn build_service(db: &Arc<DatabaseConnection>) -> ContentService {
        ContentService::new(ContentRepository::new(Arc::clone(db)))
    }

    fn mock_content(id: i32, title: &str) -> content::Model {
        content::Model {
            id,
            title: title.to_string(),
            body: "Isi artikel edukasi.".to_string(),
            image_url: None,
            author_id: 9,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_records_author() {
        let created = mock_content(1, "Mengenali Kekerasan dalam Rumah Tangga");

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

        let input = CreateContentInput {
            title: "Mengenali Kekerasan dalam Rumah Tangga".to_string(),
            body: "Isi artikel edukasi.".to_string(),
            image_url: None,
        };

        let content = service.create(9, input).await.unwrap();
        assert_eq!(content.author_id, 9);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = build_service(&db);

        let input = CreateContentInput {
            title: String::new(),
            body: "Isi artikel edukasi.".to_string(),
            image_url: None,
        };

        let result = service.create(9, input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_content() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<content::Model>::new()])
                .into_connection(),
        );
        let service = build_service(&db);

        let input = UpdateContentInput {
            title: Some("Judul baru".to_string()),
            body: None,
            image_url: None,
        };

        let result = service.update(42, input).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
