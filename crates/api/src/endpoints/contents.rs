//! Educational content endpoints.

use axum::{
    Router,
    extract::{Multipart, Path, Query, State},
    routing::{delete, get, post, put},
};
use pedika_common::AppResult;
use pedika_core::{CreateContentInput, UpdateContentInput};
use pedika_db::entities::content;
use serde::Deserialize;
use tracing::info;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::ApiResponse,
    uploads::{parse_form, store_file},
};

/// Routes every caller can reach.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contents))
        .route("/{id}", get(get_content))
}

/// Admin-only management routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_content))
        .route("/{id}", put(update_content))
        .route("/{id}", delete(delete_content))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
}

async fn list_contents(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<content::Model>>> {
    let contents = state.content_service.list(query.limit, query.offset).await?;

    Ok(ApiResponse::ok("Daftar konten ditemukan", contents))
}

async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<content::Model>> {
    let content = state.content_service.get(id).await?;

    Ok(ApiResponse::ok("Konten ditemukan", content))
}

/// Publish a content item.
///
/// Multipart: `data` JSON part plus an optional `image` file.
async fn create_content(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<content::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: CreateContentInput = form.json()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), admin.id, form.first_file("image")).await?
    {
        input.image_url = Some(url);
    }

    info!(admin_id = %admin.id, title = %input.title, "Creating content");

    let content = state.content_service.create(admin.id, input).await?;

    Ok(ApiResponse::created("Konten dibuat", content))
}

/// Update a content item.
async fn update_content(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<ApiResponse<content::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: UpdateContentInput = form.json_or_default()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), admin.id, form.first_file("image")).await?
    {
        input.image_url = Some(url);
    }

    info!(admin_id = %admin.id, content_id = %id, "Updating content");

    let content = state.content_service.update(id, input).await?;

    Ok(ApiResponse::ok("Konten diperbarui", content))
}

async fn delete_content(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    info!(admin_id = %admin.id, content_id = %id, "Deleting content");

    state.content_service.delete(id).await?;

    Ok(ApiResponse::message("Konten dihapus"))
}
