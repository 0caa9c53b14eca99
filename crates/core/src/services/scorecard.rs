//! Scorecard service.
//!
//! Loads a place's reviews, reduces them with [`compute_scores`] and stores
//! the result on the place's scorecard.

use std::collections::HashMap;

use chrono::Utc;
use places_common::{AppError, AppResult};
use places_db::{
    entities::scorecard,
    repositories::{FeedbackRepository, PlaceRepository, ReviewRepository, ScorecardRepository},
};

use crate::scoring::{ReviewSnapshot, Scores, compute_scores, latest_per_reviewer};

/// Freshly computed scores for a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedScores {
    pub scores: Scores,
    pub reviewer_count: usize,
}

/// Service for computing and storing scorecards.
#[derive(Clone)]
pub struct ScorecardService {
    place_repo: PlaceRepository,
    review_repo: ReviewRepository,
    feedback_repo: FeedbackRepository,
    scorecard_repo: ScorecardRepository,
}

impl ScorecardService {
    /// Create a new scorecard service.
    #[must_use]
    pub const fn new(
        place_repo: PlaceRepository,
        review_repo: ReviewRepository,
        feedback_repo: FeedbackRepository,
        scorecard_repo: ScorecardRepository,
    ) -> Self {
        Self {
            place_repo,
            review_repo,
            feedback_repo,
            scorecard_repo,
        }
    }

    /// Compute scores for a place without storing them.
    ///
    /// Fails with a precondition error when the place has no reviewers.
    pub async fn compute(&self, place_id: &str) -> AppResult<ComputedScores> {
        self.place_repo.get_by_id(place_id).await?;

        let snapshots = self.load_snapshots(place_id).await?;
        let reviewer_count = latest_per_reviewer(&snapshots).len();
        if reviewer_count == 0 {
            return Err(AppError::Precondition(format!(
                "Place {place_id} has no reviews to score"
            )));
        }

        Ok(ComputedScores {
            scores: compute_scores(&snapshots),
            reviewer_count,
        })
    }

    /// Recompute and store a place's scorecard, replacing the previous one.
    pub async fn refresh(&self, place_id: &str) -> AppResult<scorecard::Model> {
        let computed = self.compute(place_id).await?;

        let scores = serde_json::to_value(&computed.scores)
            .map_err(|e| AppError::Internal(format!("Failed to encode scores: {e}")))?;
        let reviewer_count = i32::try_from(computed.reviewer_count)
            .map_err(|e| AppError::Internal(format!("Reviewer count out of range: {e}")))?;

        let model = self
            .scorecard_repo
            .save(scorecard::Model {
                place_id: place_id.to_string(),
                scores,
                reviewer_count,
                computed_at: Utc::now().into(),
            })
            .await?;

        tracing::info!(
            place_id = %place_id,
            reviewer_count,
            attributes = computed.scores.len(),
            "Refreshed scorecard"
        );
        Ok(model)
    }

    /// Find the stored scorecard of a place.
    pub async fn find(&self, place_id: &str) -> AppResult<Option<scorecard::Model>> {
        self.scorecard_repo.find_by_place_id(place_id).await
    }

    /// Get the stored scorecard of a place.
    pub async fn get(&self, place_id: &str) -> AppResult<scorecard::Model> {
        self.place_repo.get_by_id(place_id).await?;
        self.find(place_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Scorecard for place {place_id}")))
    }

    async fn load_snapshots(&self, place_id: &str) -> AppResult<Vec<ReviewSnapshot>> {
        let reviews = self.review_repo.find_attributed_by_place(place_id).await?;
        let review_ids: Vec<String> = reviews.iter().map(|r| r.id.clone()).collect();
        let feedback: HashMap<String, _> = self
            .feedback_repo
            .find_by_review_ids(&review_ids)
            .await?
            .into_iter()
            .map(|f| (f.review_id.clone(), f))
            .collect();

        let snapshots = reviews
            .iter()
            .filter_map(|review| {
                let Some(fb) = feedback.get(&review.id) else {
                    tracing::warn!(review_id = %review.id, "Review has no feedback");
                    return None;
                };
                ReviewSnapshot::from_models(review, fb)
            })
            .collect();
        Ok(snapshots)
    }
}

/// Decode the scores stored on a scorecard.
pub fn stored_scores(model: &scorecard::Model) -> AppResult<Scores> {
    serde_json::from_value(model.scores.clone())
        .map_err(|e| AppError::Internal(format!("Corrupt scorecard for {}: {e}", model.place_id)))
}
