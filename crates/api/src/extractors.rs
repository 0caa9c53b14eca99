//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use places_common::{AppError, AppResult};
use places_db::entities::user;
use serde::Deserialize;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: u64 = 20;

/// Largest page size a client may request.
pub const MAX_LIMIT: u64 = 100;

/// Authenticated user extractor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl AuthUser {
    /// Require the user to be an administrator.
    pub fn require_admin(&self) -> AppResult<&user::Model> {
        if !self.0.is_admin {
            return Err(AppError::Forbidden("Administrator access required".to_string()));
        }
        Ok(&self.0)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by the auth middleware
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    /// Page size, clamped to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}
