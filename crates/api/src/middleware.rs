//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use places_core::{PlaceService, ReviewService, ScorecardService, UserService};
use places_db::repositories::{
    FeedbackRepository, PlaceRepository, ReviewRepository, ScorecardRepository, UserRepository,
};
use sea_orm::DatabaseConnection;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub place_service: PlaceService,
    pub review_service: ReviewService,
    pub scorecard_service: ScorecardService,
}

impl AppState {
    /// Wire repositories and services over one connection pool.
    ///
    /// With `refresh_on_submit` every accepted review recomputes the place's
    /// scorecard before the response is sent.
    #[must_use]
    pub fn new(db: &Arc<DatabaseConnection>, refresh_on_submit: bool) -> Self {
        let place_repo = PlaceRepository::new(Arc::clone(db));
        let review_repo = ReviewRepository::new(Arc::clone(db));
        let feedback_repo = FeedbackRepository::new(Arc::clone(db));
        let scorecard_repo = ScorecardRepository::new(Arc::clone(db));
        let user_repo = UserRepository::new(Arc::clone(db));

        let scorecard_service = ScorecardService::new(
            place_repo.clone(),
            review_repo.clone(),
            feedback_repo.clone(),
            scorecard_repo,
        );
        let review_service = if refresh_on_submit {
            ReviewService::with_scorecard_refresh(
                place_repo.clone(),
                review_repo,
                feedback_repo,
                scorecard_service.clone(),
            )
        } else {
            ReviewService::new(place_repo.clone(), review_repo, feedback_repo)
        };

        Self {
            user_service: UserService::new(user_repo),
            place_service: PlaceService::new(place_repo),
            review_service,
            scorecard_service,
        }
    }
}

/// Authentication middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.user_service.authenticate_by_token(token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => tracing::debug!(error = %e, "Bearer token rejected"),
        }
    }

    next.run(req).await
}
