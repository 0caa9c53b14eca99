//! Review service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use places_common::{AppResult, IdGenerator};
use places_db::{
    entities::review,
    repositories::{FeedbackRepository, PlaceRepository, ReviewRepository},
};
use sea_orm::Set;

use super::scorecard::ScorecardService;
use crate::feedback::Ratings;

/// Input for submitting a review.
#[derive(Debug, Clone)]
pub struct SubmitReviewInput {
    pub ratings: Ratings,
    /// Defaults to the submission time.
    pub visit_date: Option<DateTime<Utc>>,
}

/// A review together with its feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithFeedback {
    pub review: review::Model,
    pub ratings: Ratings,
}

/// Service for submitting and reading reviews.
#[derive(Clone)]
pub struct ReviewService {
    place_repo: PlaceRepository,
    review_repo: ReviewRepository,
    feedback_repo: FeedbackRepository,
    scorecard_service: Option<ScorecardService>,
    id_gen: IdGenerator,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(
        place_repo: PlaceRepository,
        review_repo: ReviewRepository,
        feedback_repo: FeedbackRepository,
    ) -> Self {
        Self {
            place_repo,
            review_repo,
            feedback_repo,
            scorecard_service: None,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a review service that refreshes the place's scorecard after
    /// every submission.
    #[must_use]
    pub const fn with_scorecard_refresh(
        place_repo: PlaceRepository,
        review_repo: ReviewRepository,
        feedback_repo: FeedbackRepository,
        scorecard_service: ScorecardService,
    ) -> Self {
        Self {
            place_repo,
            review_repo,
            feedback_repo,
            scorecard_service: Some(scorecard_service),
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit a review of a place.
    ///
    /// Nothing is written unless the feedback is valid. The review and its
    /// feedback are stored in one transaction.
    pub async fn submit(
        &self,
        place_id: &str,
        reviewer_id: &str,
        input: SubmitReviewInput,
    ) -> AppResult<ReviewWithFeedback> {
        let place = self.place_repo.get_by_id(place_id).await?;

        if let Err(e) = input.ratings.validate() {
            tracing::debug!(
                place_id = %place.id,
                reviewer_id = %reviewer_id,
                error = %e,
                "Rejected feedback"
            );
            return Err(e);
        }

        let now = Utc::now();
        let review_id = self.id_gen.generate();
        let review_model = review::ActiveModel {
            id: Set(review_id.clone()),
            place_id: Set(place.id.clone()),
            reviewer_id: Set(Some(reviewer_id.to_string())),
            review_date: Set(Some(now.into())),
            visit_date: Set(input.visit_date.unwrap_or(now).into()),
        };
        let feedback_model = input.ratings.into_active_model(&review_id);

        let (review, feedback) = self
            .review_repo
            .create_with_feedback(review_model, feedback_model)
            .await?;

        tracing::info!(
            place_id = %place.id,
            review_id = %review.id,
            reviewer_id = %reviewer_id,
            "Review submitted"
        );

        if let Some(scorecards) = &self.scorecard_service
            && let Err(e) = scorecards.refresh(&place.id).await
        {
            tracing::warn!(place_id = %place.id, error = %e, "Failed to refresh scorecard");
        }

        Ok(ReviewWithFeedback {
            review,
            ratings: Ratings::from_model(&feedback),
        })
    }

    /// List a place's reviews, latest visit first.
    pub async fn list_for_place(
        &self,
        place_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<ReviewWithFeedback>> {
        self.place_repo.get_by_id(place_id).await?;

        let reviews = self
            .review_repo
            .find_by_place(place_id, limit, offset)
            .await?;
        self.attach_feedback(reviews).await
    }

    /// Get a reviewer's most recent review of a place.
    pub async fn latest_for_reviewer(
        &self,
        place_id: &str,
        reviewer_id: &str,
    ) -> AppResult<Option<ReviewWithFeedback>> {
        self.place_repo.get_by_id(place_id).await?;

        let Some(review) = self
            .review_repo
            .find_latest_by_reviewer(place_id, reviewer_id)
            .await?
        else {
            return Ok(None);
        };
        Ok(self.attach_feedback(vec![review]).await?.pop())
    }

    /// Count the distinct reviewers of a place.
    pub async fn count_reviewers(&self, place_id: &str) -> AppResult<usize> {
        Ok(self
            .review_repo
            .find_distinct_reviewers(place_id)
            .await?
            .len())
    }

    async fn attach_feedback(
        &self,
        reviews: Vec<review::Model>,
    ) -> AppResult<Vec<ReviewWithFeedback>> {
        let ids: Vec<String> = reviews.iter().map(|r| r.id.clone()).collect();
        let mut feedback: HashMap<String, Ratings> = self
            .feedback_repo
            .find_by_review_ids(&ids)
            .await?
            .iter()
            .map(|f| (f.review_id.clone(), Ratings::from_model(f)))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|review| ReviewWithFeedback {
                ratings: feedback.remove(&review.id).unwrap_or_default(),
                review,
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::feedback::Rating;
    use places_common::AppError;
    use places_db::entities::{feedback, place, scorecard};
    use places_db::repositories::ScorecardRepository;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
    use serde_json::json;
    use std::sync::Arc;

    fn test_place() -> place::Model {
        place::Model {
            id: "p1".to_string(),
            name: "Cafe".to_string(),
            street_address: "1 Main St".to_string(),
            suburb: "Glebe".to_string(),
            state: "NSW".to_string(),
            postcode: "2037".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_review(id: &str) -> review::Model {
        review::Model {
            id: id.to_string(),
            place_id: "p1".to_string(),
            reviewer_id: Some("u1".to_string()),
            review_date: Some(Utc::now().into()),
            visit_date: Utc::now().into(),
        }
    }

    fn test_feedback(review_id: &str) -> feedback::Model {
        feedback::Model {
            review_id: review_id.to_string(),
            atmosphere: None,
            cleanliness: None,
            decor: None,
            drink: None,
            entertainment: None,
            food: Some(true),
            quality: None,
            service: Some(true),
            speed: None,
            value: Some(false),
        }
    }

    fn three_ratings() -> Ratings {
        Ratings::new()
            .with(Attribute::Food, Rating::Good)
            .with(Attribute::Service, Rating::Good)
            .with(Attribute::Value, Rating::Poor)
    }

    fn service_with(db: &Arc<DatabaseConnection>) -> ReviewService {
        ReviewService::new(
            PlaceRepository::new(Arc::clone(db)),
            ReviewRepository::new(Arc::clone(db)),
            FeedbackRepository::new(Arc::clone(db)),
        )
    }

    fn refreshing_service_with(db: &Arc<DatabaseConnection>) -> ReviewService {
        let scorecards = ScorecardService::new(
            PlaceRepository::new(Arc::clone(db)),
            ReviewRepository::new(Arc::clone(db)),
            FeedbackRepository::new(Arc::clone(db)),
            ScorecardRepository::new(Arc::clone(db)),
        );
        ReviewService::with_scorecard_refresh(
            PlaceRepository::new(Arc::clone(db)),
            ReviewRepository::new(Arc::clone(db)),
            FeedbackRepository::new(Arc::clone(db)),
            scorecards,
        )
    }

    #[tokio::test]
    async fn test_submit() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_place()]])
                .append_query_results([[test_review("r1")]])
                .append_query_results([[test_feedback("r1")]])
                .into_connection(),
        );
        let service = service_with(&db);

        let result = service
            .submit(
                "p1",
                "u1",
                SubmitReviewInput {
                    ratings: three_ratings(),
                    visit_date: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.review.id, "r1");
        assert_eq!(result.ratings, three_ratings());
    }

    #[tokio::test]
    async fn test_submit_too_few_ratings_writes_nothing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_place()]])
                .into_connection(),
        );
        let service = service_with(&db);

        let ratings = Ratings::new()
            .with(Attribute::Food, Rating::Good)
            .with(Attribute::Value, Rating::Poor);
        let result = service
            .submit(
                "p1",
                "u1",
                SubmitReviewInput {
                    ratings,
                    visit_date: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));

        drop(service);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        // Only the place lookup ran.
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_unknown_place() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<place::Model>::new()])
                .into_connection(),
        );
        let service = service_with(&db);

        let result = service
            .submit(
                "missing",
                "u1",
                SubmitReviewInput {
                    ratings: three_ratings(),
                    visit_date: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::PlaceNotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_with_refresh_stores_scorecard() {
        let stored = scorecard::Model {
            place_id: "p1".to_string(),
            scores: json!({"food": [100, 100], "service": [100, 100], "value": [-100, 100]}),
            reviewer_count: 1,
            computed_at: Utc::now().into(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_place()]])
                .append_query_results([[test_review("r1")]])
                .append_query_results([[test_feedback("r1")]])
                .append_query_results([[test_place()]])
                .append_query_results([[test_review("r1")]])
                .append_query_results([[test_feedback("r1")]])
                .append_query_results([Vec::<scorecard::Model>::new()])
                .append_query_results([[stored]])
                .into_connection(),
        );
        let service = refreshing_service_with(&db);

        let result = service
            .submit(
                "p1",
                "u1",
                SubmitReviewInput {
                    ratings: three_ratings(),
                    visit_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(result.review.id, "r1");

        drop(service);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = db.into_transaction_log();
        let insert = log
            .iter()
            .flat_map(|txn| txn.statements())
            .find(|stmt| stmt.sql.starts_with(r#"INSERT INTO "scorecard""#))
            .expect("scorecard was not inserted");
        let scores = insert
            .values
            .as_ref()
            .unwrap()
            .0
            .iter()
            .find_map(|value| match value {
                Value::Json(Some(json)) => Some(json.as_ref().clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            scores,
            json!({"food": [100, 100], "service": [100, 100], "value": [-100, 100]})
        );
    }

    #[tokio::test]
    async fn test_submit_refresh_failure_keeps_review() {
        // The refresh finds the place but the scorecard insert has no result.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_place()]])
                .append_query_results([[test_review("r1")]])
                .append_query_results([[test_feedback("r1")]])
                .append_query_results([[test_place()]])
                .append_query_results([[test_review("r1")]])
                .append_query_results([[test_feedback("r1")]])
                .append_query_results([Vec::<scorecard::Model>::new()])
                .into_connection(),
        );
        let service = refreshing_service_with(&db);

        let result = service
            .submit(
                "p1",
                "u1",
                SubmitReviewInput {
                    ratings: three_ratings(),
                    visit_date: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.review.id, "r1");
    }

    #[tokio::test]
    async fn test_list_for_place_attaches_feedback() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_place()]])
                .append_query_results([[test_review("r2"), test_review("r1")]])
                .append_query_results([[test_feedback("r1")]])
                .into_connection(),
        );
        let service = service_with(&db);

        let result = service.list_for_place("p1", 20, 0).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].review.id, "r2");
        assert_eq!(result[0].ratings.rated_count(), 0);
        assert_eq!(result[1].ratings, three_ratings());
    }

    #[tokio::test]
    async fn test_latest_for_reviewer_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_place()]])
                .append_query_results([Vec::<review::Model>::new()])
                .into_connection(),
        );
        let service = service_with(&db);

        let result = service.latest_for_reviewer("p1", "u1").await.unwrap();

        assert!(result.is_none());
    }
}
