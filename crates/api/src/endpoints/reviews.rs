//! Review endpoints.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use places_common::{AppError, AppResult};
use places_core::{Attribute, Rating, Ratings, ReviewWithFeedback, SubmitReviewInput};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, Pagination},
    middleware::AppState,
    response::ApiResponse,
};

/// Review submission.
///
/// Ratings are given either as `ratings` (attribute name to `"good"` or
/// `"poor"`) or as separate `good` and `poor` attribute lists.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub ratings: Option<BTreeMap<String, String>>,
    pub good: Option<Vec<String>>,
    pub poor: Option<Vec<String>>,
    pub visit_date: Option<DateTime<Utc>>,
}

impl SubmitReviewRequest {
    fn into_input(self) -> AppResult<SubmitReviewInput> {
        let lists_given = self.good.is_some() || self.poor.is_some();
        let ratings = match self.ratings {
            Some(_) if lists_given => {
                return Err(AppError::BadRequest(
                    "Give either ratings or good/poor lists, not both".to_string(),
                ));
            }
            Some(map) => Ratings::from_map(&map)?,
            None => {
                let good = self.good.unwrap_or_default();
                let poor = self.poor.unwrap_or_default();
                Ratings::from_lists(good.as_slice(), poor.as_slice())?
            }
        };

        Ok(SubmitReviewInput {
            ratings,
            visit_date: self.visit_date,
        })
    }
}

/// A review with its feedback.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub place_id: String,
    pub reviewer_id: Option<String>,
    pub review_date: Option<DateTimeWithTimeZone>,
    pub visit_date: DateTimeWithTimeZone,
    pub ratings: Ratings,
    pub good: Vec<Attribute>,
    pub poor: Vec<Attribute>,
}

impl From<ReviewWithFeedback> for ReviewResponse {
    fn from(ReviewWithFeedback { review, ratings }: ReviewWithFeedback) -> Self {
        Self {
            id: review.id,
            place_id: review.place_id,
            reviewer_id: review.reviewer_id,
            review_date: review.review_date,
            visit_date: review.visit_date,
            good: ratings.get_feedback(Rating::Good),
            poor: ratings.get_feedback(Rating::Poor),
            ratings,
        }
    }
}

/// Submit a review of a place.
async fn submit(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Json(req): Json<SubmitReviewRequest>,
) -> AppResult<ApiResponse<ReviewResponse>> {
    let input = req.into_input()?;

    let review = state
        .review_service
        .submit(&place_id, &user.id, input)
        .await?;

    Ok(ApiResponse::created(review.into()))
}

/// List a place's reviews, latest visit first.
async fn list(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Query(page): Query<Pagination>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let reviews = state
        .review_service
        .list_for_place(&place_id, page.limit(), page.offset())
        .await?;

    Ok(ApiResponse::ok(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

/// Show the caller's latest review of a place.
async fn mine(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> AppResult<ApiResponse<ReviewResponse>> {
    let review = state
        .review_service
        .latest_for_reviewer(&place_id, &user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No review of place {place_id}")))?;

    Ok(ApiResponse::ok(review.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/reviews", get(list).post(submit))
        .route("/{id}/reviews/mine", get(mine))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ratings_map_request() {
        let req: SubmitReviewRequest = serde_json::from_str(
            r#"{"ratings":{"food":"good","service":"good","value":"poor"},"visitDate":"2024-03-01T18:30:00Z"}"#,
        )
        .unwrap();

        let input = req.into_input().unwrap();

        assert_eq!(input.ratings.counts(), (2, 1));
        assert!(input.visit_date.is_some());
    }

    #[test]
    fn test_list_request() {
        let req: SubmitReviewRequest =
            serde_json::from_str(r#"{"good":["food","decor"],"poor":["speed"]}"#).unwrap();

        let input = req.into_input().unwrap();

        assert_eq!(input.ratings.get(Attribute::Speed), Some(Rating::Poor));
        assert!(input.visit_date.is_none());
    }

    #[test]
    fn test_mixed_request_rejected() {
        let req = SubmitReviewRequest {
            ratings: Some(BTreeMap::new()),
            good: Some(vec!["food".to_string()]),
            ..Default::default()
        };

        assert!(matches!(req.into_input(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_contradictory_lists_rejected() {
        let req = SubmitReviewRequest {
            good: Some(vec!["food".to_string(), "drink".to_string()]),
            poor: Some(vec!["drink".to_string()]),
            ..Default::default()
        };

        assert!(matches!(req.into_input(), Err(AppError::Validation(_))));
    }
}
