//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use pedika_common::AppResult;
use pedika_core::{LoginInput, RegisterInput, TokenResponse};
use pedika_db::entities::user;
use serde::Serialize;

use crate::{middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: user::Model,
}

/// Register a citizen account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let user = state.user_service.register(input).await?;

    Ok(ApiResponse::created(
        "Registrasi berhasil",
        RegisterResponse { user },
    ))
}

/// Sign in with email, username or phone.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let response = state.user_service.login(input).await?;

    Ok(ApiResponse::ok("Login berhasil", response))
}
