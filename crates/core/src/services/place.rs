//! Place service.

use chrono::Utc;
use places_common::{AppError, AppResult, IdGenerator};
use places_db::{entities::place, repositories::PlaceRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a place.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaceInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub street_address: String,
    #[validate(length(min = 1, max = 50))]
    pub suburb: String,
    #[validate(length(min = 1, max = 3))]
    pub state: String,
    #[validate(length(min = 1, max = 4))]
    pub postcode: String,
}

/// Input for updating a place. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaceInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub street_address: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub suburb: Option<String>,
    #[validate(length(min = 1, max = 3))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 4))]
    pub postcode: Option<String>,
}

/// Service for managing places.
#[derive(Clone)]
pub struct PlaceService {
    place_repo: PlaceRepository,
    id_gen: IdGenerator,
}

impl PlaceService {
    /// Create a new place service.
    #[must_use]
    pub const fn new(place_repo: PlaceRepository) -> Self {
        Self {
            place_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get a place by ID.
    pub async fn get(&self, id: &str) -> AppResult<place::Model> {
        self.place_repo.get_by_id(id).await
    }

    /// List places by name, optionally in one suburb.
    pub async fn list(
        &self,
        suburb: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<place::Model>> {
        let suburb = suburb.map(str::trim).filter(|s| !s.is_empty());
        self.place_repo.find_all(suburb, limit, offset).await
    }

    /// Create a new place.
    pub async fn create(&self, input: CreatePlaceInput) -> AppResult<place::Model> {
        input.validate()?;
        ensure_not_blank(&[
            ("name", Some(&input.name)),
            ("streetAddress", Some(&input.street_address)),
            ("suburb", Some(&input.suburb)),
            ("state", Some(&input.state)),
            ("postcode", Some(&input.postcode)),
        ])?;

        let model = place::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            street_address: Set(input.street_address),
            suburb: Set(input.suburb),
            state: Set(input.state),
            postcode: Set(input.postcode),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let place = self.place_repo.create(model).await?;
        tracing::info!(place_id = %place.id, place = %place, "Created place");
        Ok(place)
    }

    /// Update a place.
    pub async fn update(&self, id: &str, input: UpdatePlaceInput) -> AppResult<place::Model> {
        input.validate()?;
        ensure_not_blank(&[
            ("name", input.name.as_ref()),
            ("streetAddress", input.street_address.as_ref()),
            ("suburb", input.suburb.as_ref()),
            ("state", input.state.as_ref()),
            ("postcode", input.postcode.as_ref()),
        ])?;

        let place = self.place_repo.get_by_id(id).await?;
        let mut active: place::ActiveModel = place.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(street_address) = input.street_address {
            active.street_address = Set(street_address);
        }
        if let Some(suburb) = input.suburb {
            active.suburb = Set(suburb);
        }
        if let Some(state) = input.state {
            active.state = Set(state);
        }
        if let Some(postcode) = input.postcode {
            active.postcode = Set(postcode);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.place_repo.update(active).await
    }

    /// Delete a place together with its reviews and scorecard.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.place_repo.delete(id).await?;
        tracing::info!(place_id = %id, "Deleted place");
        Ok(())
    }
}

fn ensure_not_blank(fields: &[(&str, Option<&String>)]) -> AppResult<()> {
    for (field, value) in fields {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(AppError::Validation(format!("{field} cannot be blank")));
        }
    }
    Ok(())
}
