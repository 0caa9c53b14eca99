//! API endpoints.

#![allow(missing_docs)]

pub mod auth;
pub mod meta;
pub mod places;
pub mod reviews;
pub mod scorecards;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/meta", meta::router())
        .nest(
            "/places",
            places::router()
                .merge(reviews::router())
                .merge(scorecards::router()),
        )
}
