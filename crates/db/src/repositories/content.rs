//! Content repository.

use std::sync::Arc;

use crate::entities::{Content, content};
use pedika_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};

use super::map_insert_err;

/// Repository for published content.
#[derive(Clone)]
pub struct ContentRepository {
    db: Arc<DatabaseConnection>,
}

impl ContentRepository {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find all content, newest first.
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<content::Model>> {
        Content::find()
            .order_by_desc(content::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find content by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<content::Model>> {
        Content::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find content by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<content::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("content {id} not found")))
    }

    /// Insert new content.
    pub async fn create(&self, model: content::ActiveModel) -> AppResult<content::Model> {
        model.insert(self.db.as_ref()).await.map_err(map_insert_err)
    }

    /// Update content.
    pub async fn update(&self, model: content::ActiveModel) -> AppResult<content::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete content.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        Content::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    fn create_test_content(id: i32, title: &str) -> content::Model {
        content::Model {
            id,
            title: title.to_string(),
            body: "Isi artikel.".to_string(),
            image_url: None,
            author_id: 1,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_all() {
        let c1 = create_test_content(1, "Mengenali kekerasan verbal");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1]])
                .into_connection(),
        );

        let repo = ContentRepository::new(db);
        let result = repo.find_all(20, 0).await.unwrap();

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_create_content() {
        let content = create_test_content(1, "Layanan pendampingan korban");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[content.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ContentRepository::new(db);

        let active = content::ActiveModel {
            title: Set("Layanan pendampingan korban".to_string()),
            body: Set("Isi artikel.".to_string()),
            author_id: Set(1),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.title, "Layanan pendampingan korban");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<content::Model>::new()])
                .into_connection(),
        );

        let repo = ContentRepository::new(db);
        let result = repo.get_by_id(42).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
