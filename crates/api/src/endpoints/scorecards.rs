//! Scorecard endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use places_common::AppResult;
use places_core::{Scores, stored_scores};
use places_db::entities::scorecard;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// A place's stored scorecard.
///
/// `scores` maps each rated attribute to `[polarity, coverage]`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardResponse {
    pub place_id: String,
    pub scores: Scores,
    pub reviewer_count: i32,
    pub computed_at: DateTimeWithTimeZone,
}

impl TryFrom<scorecard::Model> for ScorecardResponse {
    type Error = places_common::AppError;

    fn try_from(model: scorecard::Model) -> AppResult<Self> {
        let scores = stored_scores(&model)?;
        Ok(Self {
            place_id: model.place_id,
            scores,
            reviewer_count: model.reviewer_count,
            computed_at: model.computed_at,
        })
    }
}

/// Show a place's scorecard.
async fn show(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> AppResult<ApiResponse<ScorecardResponse>> {
    let model = state.scorecard_service.get(&place_id).await?;
    Ok(ApiResponse::ok(ScorecardResponse::try_from(model)?))
}

/// Recompute a place's scorecard.
async fn refresh(
    user: AuthUser,
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> AppResult<ApiResponse<ScorecardResponse>> {
    user.require_admin()?;

    let model = state.scorecard_service.refresh(&place_id).await?;
    Ok(ApiResponse::ok(ScorecardResponse::try_from(model)?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/scorecard", get(show))
        .route("/{id}/scorecard/refresh", post(refresh))
}
