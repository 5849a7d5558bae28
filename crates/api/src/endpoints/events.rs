//! Outreach event endpoints.

use axum::{
    Router,
    extract::{Multipart, Path, State},
    routing::{delete, get, post, put},
};
use pedika_common::AppResult;
use pedika_core::{CreateEventInput, UpdateEventInput};
use pedika_db::entities::event;
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
        .route("/", get(list_events))
        .route("/{id}", get(get_event))
}

/// Admin-only management routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event))
        .route("/{id}", put(update_event))
        .route("/{id}", delete(delete_event))
}

async fn list_events(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<event::Model>>> {
    let events = state.event_service.list().await?;

    Ok(ApiResponse::ok("Daftar kegiatan ditemukan", events))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<event::Model>> {
    let event = state.event_service.get(id).await?;

    Ok(ApiResponse::ok("Kegiatan ditemukan", event))
}

/// Publish an event.
///
/// Multipart: `data` JSON part plus an optional `image` file.
async fn create_event(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<event::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: CreateEventInput = form.json()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), admin.id, form.first_file("image")).await?
    {
        input.image_url = Some(url);
    }

    info!(admin_id = %admin.id, name = %input.name, "Creating event");

    let event = state.event_service.create(input).await?;

    Ok(ApiResponse::created("Kegiatan dibuat", event))
}

/// Update an event.
async fn update_event(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<ApiResponse<event::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: UpdateEventInput = form.json_or_default()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), admin.id, form.first_file("image")).await?
    {
        input.image_url = Some(url);
    }

    info!(admin_id = %admin.id, event_id = %id, "Updating event");

    let event = state.event_service.update(id, input).await?;

    Ok(ApiResponse::ok("Kegiatan diperbarui", event))
}

async fn delete_event(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    info!(admin_id = %admin.id, event_id = %id, "Deleting event");

    state.event_service.delete(id).await?;

    Ok(ApiResponse::message("Kegiatan dihapus"))
}
