//! Emergency contact endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use pedika_common::AppResult;
use pedika_db::entities::emergency_contact;
use serde::Deserialize;
use tracing::info;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Routes every caller can reach.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/", get(get_contact))
}

/// Admin-only management routes.
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", put(set_contact))
}

#[derive(Debug, Deserialize)]
pub struct SetContactRequest {
    pub phone: String,
}

/// The hotline number shown to citizens.
async fn get_contact(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<emergency_contact::Model>> {
    let contact = state.emergency_contact_service.get().await?;

    Ok(ApiResponse::ok("Kontak darurat ditemukan", contact))
}

/// Replace the hotline number.
async fn set_contact(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(request): Json<SetContactRequest>,
) -> AppResult<ApiResponse<emergency_contact::Model>> {
    info!(admin_id = %admin.id, "Updating emergency contact");

    let contact = state.emergency_contact_service.set(request.phone).await?;

    Ok(ApiResponse::ok("Kontak darurat diperbarui", contact))
}
