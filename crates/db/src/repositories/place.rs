//! Place repository.

use std::sync::Arc;

use crate::entities::{Place, place};
use places_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Place repository for database operations.
#[derive(Clone)]
pub struct PlaceRepository {
    db: Arc<DatabaseConnection>,
}

impl PlaceRepository {
    /// Create a new place repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a place by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<place::Model>> {
        Place::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a place by ID, returning error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<place::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PlaceNotFound(id.to_string()))
    }

    /// List places ordered by name, optionally restricted to one suburb.
    pub async fn find_all(
        &self,
        suburb: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<place::Model>> {
        let mut query = Place::find()
            .order_by_asc(place::Column::Name)
            .order_by_asc(place::Column::Id);

        if let Some(suburb) = suburb {
            query = query.filter(place::Column::Suburb.eq(suburb));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new place.
    pub async fn create(&self, model: place::ActiveModel) -> AppResult<place::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a place.
    pub async fn update(&self, model: place::ActiveModel) -> AppResult<place::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a place. Reviews, feedback and the scorecard go with it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = Place::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::PlaceNotFound(id.to_string()));
        }
        Ok(())
    }
}
