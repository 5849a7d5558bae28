//! Report endpoints.
//!
//! Citizens submit and follow their own reports; admins work the queue.
//! Submission and tracking writes carry files, so those routes take the
//! multipart `data` + file-parts form.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{get, post, put},
};
use pedika_common::AppResult;
use pedika_core::{CreateReportInput, CreateTrackingInput, ReportDetail, UpdateReportInput};
use pedika_db::entities::{report, report_tracking};
use serde::Deserialize;
use tracing::info;

use crate::{
    extractors::{AdminUser, CitizenUser},
    middleware::AppState,
    response::ApiResponse,
    uploads::{parse_form, store_files},
};

/// Number of reports an admin listing returns when no limit is given.
const DEFAULT_ADMIN_LIMIT: u64 = 10;

/// Citizen-facing routes.
pub fn citizen_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_report))
        .route("/", get(list_own_reports))
        .route("/{registration_number}", get(get_own_report))
        .route("/{registration_number}", put(update_own_report))
        .route("/{registration_number}/cancel", post(cancel_own_report))
}

/// Admin-facing routes.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_latest_reports))
        .route("/{registration_number}", get(get_report_detail))
        .route("/{registration_number}/process", post(process_report))
        .route("/{registration_number}/tracking", post(add_tracking))
}

#[derive(Debug, Deserialize)]
struct AdminListQuery {
    limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CancelReportRequest {
    pub reason: String,
}

/// Submit a new report.
///
/// Multipart: `data` JSON part plus any number of `evidence` files.
async fn submit_report(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<report::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: CreateReportInput = form.json()?;

    let urls = store_files(
        state.storage.as_ref(),
        user.id,
        &form.files_named("evidence"),
    )
    .await?;
    input.evidence_urls.extend(urls);

    let report = state.report_service.submit(user.id, input).await?;

    Ok(ApiResponse::created("Laporan berhasil dibuat", report))
}

async fn list_own_reports(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<report::Model>>> {
    let reports = state.report_service.list_for_user(user.id).await?;

    Ok(ApiResponse::ok("Daftar laporan ditemukan", reports))
}

async fn get_own_report(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
) -> AppResult<ApiResponse<ReportDetail>> {
    let detail = state
        .report_service
        .detail_for_owner(user.id, &registration_number)
        .await?;

    Ok(ApiResponse::ok("Laporan ditemukan", detail))
}

/// Edit a report that has not been picked up yet.
async fn update_own_report(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
    Json(input): Json<UpdateReportInput>,
) -> AppResult<ApiResponse<report::Model>> {
    let report = state
        .report_service
        .update_own(user.id, &registration_number, input)
        .await?;

    Ok(ApiResponse::ok("Laporan diperbarui", report))
}

/// Withdraw a report that has not been picked up yet.
async fn cancel_own_report(
    CitizenUser(user): CitizenUser,
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
    Json(request): Json<CancelReportRequest>,
) -> AppResult<ApiResponse<report::Model>> {
    let report = state
        .report_service
        .cancel_own(user.id, &registration_number, request.reason)
        .await?;

    Ok(ApiResponse::ok("Laporan dibatalkan", report))
}

/// Most recent reports across all citizens.
async fn list_latest_reports(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> AppResult<ApiResponse<Vec<report::Model>>> {
    let limit = query.limit.unwrap_or(DEFAULT_ADMIN_LIMIT);
    let reports = state.report_service.latest(limit).await?;

    Ok(ApiResponse::ok("Daftar laporan ditemukan", reports))
}

/// Full report detail. Opening a fresh report records it as viewed.
async fn get_report_detail(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
) -> AppResult<ApiResponse<ReportDetail>> {
    let detail = state
        .report_service
        .admin_detail(admin.id, &registration_number)
        .await?;

    Ok(ApiResponse::ok("Laporan ditemukan", detail))
}

/// Move a viewed report into processing.
async fn process_report(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
) -> AppResult<ApiResponse<report::Model>> {
    info!(admin_id = %admin.id, registration_number = %registration_number, "Processing report");

    let report = state
        .report_service
        .mark_processing(&registration_number)
        .await?;

    Ok(ApiResponse::ok("Laporan sedang diproses", report))
}

/// Append a tracking entry.
///
/// Multipart: `data` JSON part plus any number of `documents` files.
async fn add_tracking(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(registration_number): Path<String>,
    multipart: Multipart,
) -> AppResult<ApiResponse<report_tracking::Model>> {
    let form = parse_form(multipart).await?;
    let mut input: CreateTrackingInput = form.json()?;

    let urls = store_files(
        state.storage.as_ref(),
        admin.id,
        &form.files_named("documents"),
    )
    .await?;
    input.document_urls.extend(urls);

    info!(admin_id = %admin.id, registration_number = %registration_number, "Adding tracking entry");

    let tracking = state
        .report_service
        .add_tracking(&registration_number, input)
        .await?;

    Ok(ApiResponse::created("Tindak lanjut ditambahkan", tracking))
}
