//! HTTP API layer for pedika.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: public, citizen and admin route groups
//! - **Extractors**: authentication and role gating
//! - **Middleware**: bearer-token resolution, shared state
//! - **Uploads**: multipart handling for evidence and images
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod uploads;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
pub use response::ApiResponse;
