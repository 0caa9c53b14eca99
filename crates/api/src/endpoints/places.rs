//! Place endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use places_common::AppResult;
use places_core::{CreatePlaceInput, UpdatePlaceInput};
use places_db::entities::place;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use super::scorecards::ScorecardResponse;
use crate::{
    extractors::{AuthUser, Pagination},
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Place list filters.
#[derive(Debug, Deserialize)]
pub struct ListPlacesQuery {
    pub suburb: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListPlacesQuery {
    fn page(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// A place.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    pub id: String,
    pub name: String,
    pub street_address: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub display_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl From<place::Model> for PlaceResponse {
    fn from(place: place::Model) -> Self {
        Self {
            display_name: place.to_string(),
            id: place.id,
            name: place.name,
            street_address: place.street_address,
            suburb: place.suburb,
            state: place.state,
            postcode: place.postcode,
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}

/// A place with its reviewer count and scorecard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailResponse {
    #[serde(flatten)]
    pub place: PlaceResponse,
    pub reviewer_count: usize,
    pub scorecard: Option<ScorecardResponse>,
}

/// List places by name.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPlacesQuery>,
) -> AppResult<ApiResponse<Vec<PlaceResponse>>> {
    let page = query.page();
    let places = state
        .place_service
        .list(query.suburb.as_deref(), page.limit(), page.offset())
        .await?;

    Ok(ApiResponse::ok(
        places.into_iter().map(PlaceResponse::from).collect(),
    ))
}

/// Show one place.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PlaceDetailResponse>> {
    let place = state.place_service.get(&id).await?;
    let reviewer_count = state.review_service.count_reviewers(&id).await?;
    let scorecard = state
        .scorecard_service
        .find(&id)
        .await?
        .map(ScorecardResponse::try_from)
        .transpose()?;

    Ok(ApiResponse::ok(PlaceDetailResponse {
        place: place.into(),
        reviewer_count,
        scorecard,
    }))
}

/// Create a place.
async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePlaceInput>,
) -> AppResult<ApiResponse<PlaceResponse>> {
    user.require_admin()?;

    let place = state.place_service.create(input).await?;
    Ok(ApiResponse::created(place.into()))
}

/// Update some fields of a place.
async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePlaceInput>,
) -> AppResult<ApiResponse<PlaceResponse>> {
    user.require_admin()?;

    let place = state.place_service.update(&id, input).await?;
    Ok(ApiResponse::ok(place.into()))
}

/// Delete a place with its reviews and scorecard.
async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    user.require_admin()?;

    state.place_service.delete(&id).await?;
    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).patch(update).delete(delete))
}
