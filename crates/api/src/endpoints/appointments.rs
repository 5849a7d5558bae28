//! Appointment endpoints.
//!
//! Citizens request counselling slots; admins resolve them.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use pedika_common::AppResult;
use pedika_core::{CreateAppointmentInput, RejectAppointmentInput, UpdateAppointmentInput};
use pedika_db::entities::appointment;
use serde::Deserialize;
use tracing::info;

use crate::{
    extractors::{AdminUser, CitizenUser},
    middleware::AppState,
    response::ApiResponse,
};

const DEFAULT_PAGE_SIZE: u64 = 20;

/// Citizen-facing routes.
pub fn citizen_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_appointment))
        .route("/", get(list_own_appointments))
        .route("/{id}", put(update_own_appointment))
        .route("/{id}/cancel", post(cancel_own_appointment))
}

/// Admin-facing routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_appointments))
        .route("/{id}/approve", post(approve_appointment))
        .route("/{id}/reject", post(reject_appointment))
        .route("/{id}/cancel", post(admin_cancel_appointment))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<u64>,
    offset: Option<u64>,
}

/// Cancellation body. The reason is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: Option<String>,
}

/// Request a counselling appointment.
async fn create_appointment(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAppointmentInput>,
) -> AppResult<ApiResponse<appointment::Model>> {
    let appointment = state.appointment_service.create(user.id, input).await?;

    Ok(ApiResponse::created("Janji temu dibuat", appointment))
}

async fn list_own_appointments(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<appointment::Model>>> {
    let appointments = state.appointment_service.list_for_user(user.id).await?;

    Ok(ApiResponse::ok("Daftar janji temu ditemukan", appointments))
}

/// Edit an appointment that has not been resolved yet.
async fn update_own_appointment(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateAppointmentInput>,
) -> AppResult<ApiResponse<appointment::Model>> {
    let appointment = state
        .appointment_service
        .update_own(user.id, id, input)
        .await?;

    Ok(ApiResponse::ok("Janji temu diperbarui", appointment))
}

/// Withdraw an appointment that has not been resolved yet.
async fn cancel_own_appointment(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CancelAppointmentRequest>,
) -> AppResult<ApiResponse<appointment::Model>> {
    let appointment = state
        .appointment_service
        .cancel_own(user.id, id, request.reason)
        .await?;

    Ok(ApiResponse::ok("Janji temu dibatalkan", appointment))
}

async fn list_all_appointments(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<appointment::Model>>> {
    let appointments = state
        .appointment_service
        .list_all(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            query.offset.unwrap_or(0),
        )
        .await?;

    Ok(ApiResponse::ok("Daftar janji temu ditemukan", appointments))
}

async fn approve_appointment(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<appointment::Model>> {
    info!(admin_id = %admin.id, appointment_id = %id, "Approving appointment");

    let appointment = state.appointment_service.approve(admin.id, id).await?;

    Ok(ApiResponse::ok("Janji temu disetujui", appointment))
}

/// Reject an appointment. A reason is required.
async fn reject_appointment(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<RejectAppointmentInput>,
) -> AppResult<ApiResponse<appointment::Model>> {
    info!(admin_id = %admin.id, appointment_id = %id, "Rejecting appointment");

    let appointment = state.appointment_service.reject(admin.id, id, input).await?;

    Ok(ApiResponse::ok("Janji temu ditolak", appointment))
}

async fn admin_cancel_appointment(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CancelAppointmentRequest>,
) -> AppResult<ApiResponse<appointment::Model>> {
    info!(admin_id = %admin.id, appointment_id = %id, "Cancelling appointment");

    let appointment = state
        .appointment_service
        .cancel_by_admin(admin.id, id, request.reason)
        .await?;

    Ok(ApiResponse::ok("Janji temu dibatalkan", appointment))
}
