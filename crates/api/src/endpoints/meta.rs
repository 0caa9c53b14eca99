//! Meta endpoints.

use axum::{Json, Router, routing::get};
use places_core::Attribute;
use serde::Serialize;

use crate::middleware::AppState;

/// Service metadata response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub name: String,
    pub version: String,
    pub attributes: Vec<AttributeInfo>,
    pub min_rated_attributes: usize,
}

/// A rateable attribute.
#[derive(Serialize)]
pub struct AttributeInfo {
    pub name: &'static str,
    pub code: &'static str,
    pub label: &'static str,
}

/// Get service metadata.
async fn meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        name: "places-rs".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        attributes: Attribute::ALL
            .into_iter()
            .map(|attr| AttributeInfo {
                name: attr.name(),
                code: attr.code(),
                label: attr.label(),
            })
            .collect(),
        min_rated_attributes: places_core::MIN_RATED_ATTRIBUTES,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(meta))
}
