//! Place-search API handlers
//!
//! Thin handlers over [`PlaceOrchestrator`]: deserialize the request, call
//! the matching operation, serialize the outcome. All error mapping lives in
//! `AppError::into_response`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::orchestrator::types::StoryPlace;
use crate::orchestrator::{GenerateOutcome, PlaceOrchestrator};

/// Query parameters for `GET /info-place`
#[derive(Debug, Deserialize)]
pub struct InfoPlaceParams {
    /// Area name, e.g. "Bandung"
    pub name: String,
    /// Place category, e.g. "museum"
    pub category: String,
    /// Optional qualifier for the area name, e.g. "city" or "district"
    #[serde(rename = "placeType", default)]
    pub place_type: Option<String>,
}

/// Body of `POST /nearby-place`
#[derive(Debug, Deserialize)]
pub struct NearbyPlaceRequest {
    /// Center latitude
    pub lat: f64,
    /// Center longitude
    pub long: f64,
    /// Place category to restrict the search to
    pub category: String,
    /// Search radius in meters; falls back to the pipeline default
    #[serde(default)]
    pub radius: Option<f64>,
}

/// Body of `POST /listSearch`
#[derive(Debug, Deserialize)]
pub struct ListSearchRequest {
    /// Free-text address to geocode
    pub address: String,
    /// Optional place category; falls back to the pipeline default
    #[serde(default)]
    pub category: Option<String>,
    /// Search radius in meters; falls back to the pipeline default
    #[serde(default)]
    pub radius: Option<f64>,
}

/// GET /info-place - generate, filter, and geocode candidate places
///
/// Responds with an array of enriched places, or with
/// `{name, ai_description}` when the model generates nothing.
pub async fn info_place(
    State(orchestrator): State<Arc<PlaceOrchestrator>>,
    Query(params): Query<InfoPlaceParams>,
) -> Result<Json<GenerateOutcome>, AppError> {
    info!(
        name = %params.name,
        category = %params.category,
        place_type = ?params.place_type,
        "Generating places by area"
    );
    let outcome = orchestrator
        .generate_by_area(&params.name, &params.category, params.place_type.as_deref())
        .await?;
    Ok(Json(outcome))
}

/// POST /nearby-place - pass a nearby search through unmodified
pub async fn nearby_place(
    State(orchestrator): State<Arc<PlaceOrchestrator>>,
    Json(request): Json<NearbyPlaceRequest>,
) -> Result<Json<Value>, AppError> {
    info!(
        lat = request.lat,
        long = request.long,
        category = %request.category,
        radius = ?request.radius,
        "Searching nearby places"
    );
    let payload = orchestrator
        .search_nearby(request.lat, request.long, &request.category, request.radius)
        .await?;
    Ok(Json(payload))
}

/// POST /listSearch - address to nearby places to model narration
///
/// A forward-geocode or nearby-search miss responds 404 with
/// `{message:"No Data", resp}` carrying the raw provider payload.
pub async fn list_search(
    State(orchestrator): State<Arc<PlaceOrchestrator>>,
    Json(request): Json<ListSearchRequest>,
) -> Result<Json<Vec<StoryPlace>>, AppError> {
    info!(
        address = %request.address,
        category = ?request.category,
        radius = ?request.radius,
        "Searching and narrating places around address"
    );
    let places = orchestrator
        .search_address_then_nearby(
            &request.address,
            request.category.as_deref(),
            request.radius,
        )
        .await?;
    Ok(Json(places))
}
