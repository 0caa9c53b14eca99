//! Feedback repository.

use std::sync::Arc;

use crate::entities::{Feedback, feedback};
use places_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Feedback repository for database operations.
///
/// Feedback rows are written together with their review, see
/// [`ReviewRepository::create_with_feedback`](super::ReviewRepository::create_with_feedback).
#[derive(Clone)]
pub struct FeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the feedback of a review.
    pub async fn find_by_review_id(&self, review_id: &str) -> AppResult<Option<feedback::Model>> {
        Feedback::find_by_id(review_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the feedback of several reviews at once.
    pub async fn find_by_review_ids(&self, review_ids: &[String]) -> AppResult<Vec<feedback::Model>> {
        if review_ids.is_empty() {
            return Ok(vec![]);
        }

        Feedback::find()
            .filter(feedback::Column::ReviewId.is_in(review_ids.iter().cloned()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
