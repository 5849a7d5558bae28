//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use pedika_common::StorageBackend;
use pedika_core::{
    AppointmentService, CategoryService, ContentService, EmergencyContactService, EventService,
    ReportService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub report_service: ReportService,
    pub appointment_service: AppointmentService,
    pub category_service: CategoryService,
    pub content_service: ContentService,
    pub event_service: EventService,
    pub emergency_contact_service: EmergencyContactService,
    pub storage: Arc<dyn StorageBackend>,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to its user row and stores it in request
/// extensions. Requests without a valid token pass through anonymously;
/// the extractors decide whether that is acceptable per route.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        if let Ok(user) = state.user_service.authenticate_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
