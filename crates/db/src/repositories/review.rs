//! Review repository.

use std::sync::Arc;

use crate::entities::{Review, feedback, review};
use places_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

/// Review repository for database operations.
#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get reviews for a place, latest visit first (paginated).
    pub async fn find_by_place(
        &self,
        place_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::PlaceId.eq(place_id))
            .order_by_desc(review::Column::VisitDate)
            .order_by_desc(review::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every review of a place that still has a reviewer.
    pub async fn find_attributed_by_place(&self, place_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::PlaceId.eq(place_id))
            .filter(review::Column::ReviewerId.is_not_null())
            .order_by_asc(review::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the distinct reviewers of a place.
    pub async fn find_distinct_reviewers(&self, place_id: &str) -> AppResult<Vec<String>> {
        Review::find()
            .select_only()
            .column(review::Column::ReviewerId)
            .distinct()
            .filter(review::Column::PlaceId.eq(place_id))
            .filter(review::Column::ReviewerId.is_not_null())
            .order_by_asc(review::Column::ReviewerId)
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a reviewer's most recent review of a place.
    ///
    /// Reviews sharing the latest visit date are ordered by ID, so the most
    /// recently created one wins.
    pub async fn find_latest_by_reviewer(
        &self,
        place_id: &str,
        reviewer_id: &str,
    ) -> AppResult<Option<review::Model>> {
        Review::find()
            .filter(review::Column::PlaceId.eq(place_id))
            .filter(review::Column::ReviewerId.eq(reviewer_id))
            .order_by_desc(review::Column::VisitDate)
            .order_by_desc(review::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a review together with its feedback.
    ///
    /// Both rows are written in one transaction.
    pub async fn create_with_feedback(
        &self,
        review: review::ActiveModel,
        feedback: feedback::ActiveModel,
    ) -> AppResult<(review::Model, feedback::Model)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let review = review
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let feedback = feedback
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((review, feedback))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, Set, Value};
    use std::collections::BTreeMap;

    fn create_test_review(id: &str, place_id: &str, reviewer_id: &str) -> review::Model {
        review::Model {
            id: id.to_string(),
            place_id: place_id.to_string(),
            reviewer_id: Some(reviewer_id.to_string()),
            review_date: Some(Utc::now().into()),
            visit_date: Utc::now().into(),
        }
    }

    fn create_test_feedback(review_id: &str) -> feedback::Model {
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

    #[tokio::test]
    async fn test_find_by_place() {
        let r1 = create_test_review("r1", "p1", "u1");
        let r2 = create_test_review("r2", "p1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        let result = repo.find_by_place("p1", 20, 0).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.place_id == "p1"));
    }

    #[tokio::test]
    async fn test_find_distinct_reviewers() {
        let rows: Vec<BTreeMap<&str, Value>> = vec![
            BTreeMap::from([("reviewer_id", Value::from("u1"))]),
            BTreeMap::from([("reviewer_id", Value::from("u2"))]),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([rows])
                .into_connection(),
        );

        let repo = ReviewRepository::new(db);
        let result = repo.find_distinct_reviewers("p1").await.unwrap();

        assert_eq!(result, vec!["u1".to_string(), "u2".to_string()]);
    }

    #[tokio::test]
    async fn test_find_latest_by_reviewer_orders_by_visit_date() {
        let mut latest = create_test_review("r2", "p1", "u1");
        latest.visit_date = (Utc::now() + Duration::days(1)).into();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[latest.clone()]])
                .into_connection(),
        );

        let repo = ReviewRepository::new(Arc::clone(&db));
        let result = repo.find_latest_by_reviewer("p1", "u1").await.unwrap();
        assert_eq!(result, Some(latest));

        drop(repo);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = db.into_transaction_log();
        let sql = log[0].statements()[0].sql.clone();
        assert!(sql.contains(r#"ORDER BY "review"."visit_date" DESC, "review"."id" DESC"#));
    }

    #[tokio::test]
    async fn test_create_with_feedback_uses_transaction() {
        let review = create_test_review("r1", "p1", "u1");
        let feedback = create_test_feedback("r1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[review.clone()]])
                .append_query_results([[feedback.clone()]])
                .into_connection(),
        );

        let repo = ReviewRepository::new(Arc::clone(&db));
        let review_model = review::ActiveModel {
            id: Set("r1".to_string()),
            place_id: Set("p1".to_string()),
            reviewer_id: Set(Some("u1".to_string())),
            review_date: Set(review.review_date),
            visit_date: Set(review.visit_date),
        };
        let feedback_model: feedback::ActiveModel = feedback.clone().into();

        let (saved_review, saved_feedback) = repo
            .create_with_feedback(review_model, feedback_model)
            .await
            .unwrap();

        assert_eq!(saved_review, review);
        assert_eq!(saved_feedback, feedback);

        drop(repo);
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements = log[0].statements();
        assert_eq!(statements.len(), 4);
        assert_eq!(statements[0].sql, "BEGIN");
        assert_eq!(statements[3].sql, "COMMIT");
    }
}
