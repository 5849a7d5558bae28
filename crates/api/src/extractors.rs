//! Request extractors.
//!
//! The auth middleware verifies the bearer token and stores the user row
//! in request extensions; these extractors surface it to handlers with
//! the role checks applied.

use axum::{extract::FromRequestParts, http::request::Parts};
use pedika_common::AppError;
use pedika_db::entities::user;

/// Authenticated user of any role.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Authenticated citizen (`masyarakat`).
#[derive(Debug, Clone)]
pub struct CitizenUser(pub user::Model);

impl<S> FromRequestParts<S> for CitizenUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != user::Role::Masyarakat {
            return Err(AppError::Forbidden(
                "This endpoint is for citizen accounts".to_string(),
            ));
        }
        Ok(Self(user))
    }
}

/// Authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub user::Model);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != user::Role::Admin {
            return Err(AppError::Forbidden(
                "This endpoint requires an admin account".to_string(),
            ));
        }
        Ok(Self(user))
    }
}
