//! Scorecard repository.

use std::sync::Arc;

use crate::entities::{Scorecard, scorecard};
use places_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

/// Scorecard repository for database operations.
#[derive(Clone)]
pub struct ScorecardRepository {
    db: Arc<DatabaseConnection>,
}

impl ScorecardRepository {
    /// Create a new scorecard repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the scorecard of a place.
    pub async fn find_by_place_id(&self, place_id: &str) -> AppResult<Option<scorecard::Model>> {
        Scorecard::find_by_id(place_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a scorecard, replacing any previous one for the same place.
    pub async fn save(&self, model: scorecard::Model) -> AppResult<scorecard::Model> {
        match self.find_by_place_id(&model.place_id).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.scores = Set(model.scores);
                active.reviewer_count = Set(model.reviewer_count);
                active.computed_at = Set(model.computed_at);
                active
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
            None => model
                .into_active_model()
                .insert(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn create_test_scorecard(place_id: &str, scores: serde_json::Value) -> scorecard::Model {
        scorecard::Model {
            place_id: place_id.to_string(),
            scores,
            reviewer_count: 2,
            computed_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_place_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<scorecard::Model>::new()])
                .into_connection(),
        );

        let repo = ScorecardRepository::new(db);
        let result = repo.find_by_place_id("p1").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_save_inserts_when_absent() {
        let card = create_test_scorecard("p1", json!({"food": [100, 100]}));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<scorecard::Model>::new()])
                .append_query_results([[card.clone()]])
                .into_connection(),
        );

        let repo = ScorecardRepository::new(db);
        let saved = repo.save(card.clone()).await.unwrap();

        assert_eq!(saved, card);
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let old = create_test_scorecard("p1", json!({"food": [0, 50]}));
        let new = create_test_scorecard("p1", json!({"value": [-100, 100]}));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[old]])
                .append_query_results([[new.clone()]])
                .into_connection(),
        );

        let repo = ScorecardRepository::new(db);
        let saved = repo.save(new.clone()).await.unwrap();

        assert_eq!(saved.scores, json!({"value": [-100, 100]}));
    }
}
