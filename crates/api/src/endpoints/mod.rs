//! API endpoints.

mod appointments;
mod auth;
mod categories;
mod contents;
mod emergency_contact;
mod events;
mod health;
mod profile;
mod reports;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/categories", categories::public_router())
        .nest("/contents", contents::public_router())
        .nest("/events", events::public_router())
        .nest("/emergency-contact", emergency_contact::public_router())
        .nest("/citizen/reports", reports::citizen_router())
        .nest("/citizen/appointments", appointments::citizen_router())
        .nest("/admin/reports", reports::admin_router())
        .nest("/admin/appointments", appointments::admin_router())
        .nest("/admin/categories", categories::admin_router())
        .nest("/admin/contents", contents::admin_router())
        .nest("/admin/events", events::admin_router())
        .nest("/admin/emergency-contact", emergency_contact::admin_router())
}
