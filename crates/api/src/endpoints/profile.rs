//! Profile endpoints.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, put},
};
use pedika_common::AppResult;
use pedika_core::{ChangePasswordInput, UpdateProfileInput};
use pedika_db::entities::user;

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::ApiResponse,
    uploads::{parse_form, store_file},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/", put(update_profile))
        .route("/password", put(change_password))
}

/// The authenticated user's profile.
async fn get_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<user::Model>> {
    let profile = state.user_service.profile(user.id).await?;

    Ok(ApiResponse::ok("Profil ditemukan", profile))
}

/// Update the authenticated user's profile.
///
/// Multipart: `data` JSON part plus an optional `photo` file.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<user::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: UpdateProfileInput = form.json_or_default()?;

    if let Some(url) =
        store_file(state.storage.as_ref(), user.id, form.first_file("photo")).await?
    {
        input.photo_url = Some(url);
    }

    let profile = state.user_service.update_profile(user.id, input).await?;

    Ok(ApiResponse::ok("Profil diperbarui", profile))
}

/// Change the authenticated user's password.
async fn change_password(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordInput>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.change_password(user.id, input).await?;

    Ok(ApiResponse::message("Kata sandi diperbarui"))
}
