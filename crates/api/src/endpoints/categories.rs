//! Violence category endpoints.

use axum::{
    Router,
    extract::{Multipart, Path, State},
    routing::{delete, get, post, put},
};
use pedika_common::AppResult;
use pedika_core::{CreateCategoryInput, UpdateCategoryInput};
use pedika_db::entities::violence_category;
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
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
}

/// Admin-only management routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category))
        .route("/{id}", put(update_category))
        .route("/{id}", delete(delete_category))
}

async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<violence_category::Model>>> {
    let categories = state.category_service.list().await?;

    Ok(ApiResponse::ok("Daftar kategori ditemukan", categories))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<violence_category::Model>> {
    let category = state.category_service.get(id).await?;

    Ok(ApiResponse::ok("Kategori ditemukan", category))
}

/// Create a category.
///
/// Multipart: `data` JSON part plus an optional `image` file.
async fn create_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<violence_category::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: CreateCategoryInput = form.json()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), admin.id, form.first_file("image")).await?
    {
        input.image_url = Some(url);
    }

    info!(admin_id = %admin.id, name = %input.name, "Creating category");

    let category = state.category_service.create(input).await?;

    Ok(ApiResponse::created("Kategori dibuat", category))
}

/// Update a category.
async fn update_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<ApiResponse<violence_category::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: UpdateCategoryInput = form.json_or_default()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), admin.id, form.first_file("image")).await?
    {
        input.image_url = Some(url);
    }

    info!(admin_id = %admin.id, category_id = %id, "Updating category");

    let category = state.category_service.update(id, input).await?;

    Ok(ApiResponse::ok("Kategori diperbarui", category))
}

async fn delete_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    info!(admin_id = %admin.id, category_id = %id, "Deleting category");

    state.category_service.delete(id).await?;

    Ok(ApiResponse::message("Kategori dihapus"))
}
