//! Google Maps clients
//!
//! HTTP clients for the two Maps capabilities the pipeline consumes:
//! geocoding (forward and reverse) and Places nearby search. Nearby-search
//! responses are kept as raw JSON because one route passes them through
//! unmodified.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;

/// Mirror of the geocoding API response, reduced to the fields we read
#[derive(Deserialize, Debug)]
pub struct GeocodeResponse {
    /// Geocode matches, best first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Provider status string, e.g. "OK" or "ZERO_RESULTS"
    #[serde(default)]
    pub status: String,
}

/// A single geocode match
#[derive(Deserialize, Debug)]
pub struct GeocodeResult {
    /// Human-readable address line
    pub formatted_address: String,
    /// Geometry of the match
    pub geometry: Geometry,
}

/// Geometry of a geocode match
#[derive(Deserialize, Debug)]
pub struct Geometry {
    /// Coordinates of the match
    pub location: LatLng,
}

/// A coordinate pair in geocoding responses
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

/// Client for the geocoding and nearby-search endpoints
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    api_key: String,
    geocode_url: String,
    nearby_search_url: String,
}

impl MapsClient {
    /// Create a client for the given credential and endpoint URLs
    pub fn new(
        http: reqwest::Client,
        api_key: String,
        geocode_url: String,
        nearby_search_url: String,
    ) -> Self {
        Self {
            http,
            api_key,
            geocode_url,
            nearby_search_url,
        }
    }

    /// Reverse-geocode a coordinate pair into address candidates
    ///
    /// # Errors
    /// Returns `AppError::Upstream` on transport failure, a non-2xx status,
    /// or an unparseable body. Zero results is not an error here; the caller
    /// decides what a miss means.
    pub async fn reverse_geocode(&self, lat: f64, long: f64) -> Result<GeocodeResponse, AppError> {
        tracing::debug!(lat, long, "Reverse geocoding coordinates");
        let response = self
            .http
            .get(&self.geocode_url)
            .query(&[
                ("latlng", format!("{},{}", lat, long)),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Reverse geocode request failed: {}", e)))?;

        parse_geocode_response(response).await
    }

    /// Forward-geocode a free-text address
    ///
    /// Returns the raw payload so a miss can be surfaced to the caller
    /// verbatim as a "No Data" response.
    pub async fn forward_geocode(&self, address: &str) -> Result<Value, AppError> {
        tracing::debug!(address, "Forward geocoding address");
        let response = self
            .http
            .get(&self.geocode_url)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Forward geocode request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream_status_error("Geocode", status, response).await);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse geocode response: {}", e)))
    }

    /// Search for places of one category around a coordinate pair
    ///
    /// Requests only display name, location, and photo references, capped at
    /// `max_result_count`. The raw payload is returned unmodified.
    pub async fn search_nearby(
        &self,
        lat: f64,
        long: f64,
        category: &str,
        radius_m: f64,
        max_result_count: u32,
    ) -> Result<Value, AppError> {
        let request_body = json!({
            "includedTypes": [category],
            "maxResultCount": max_result_count,
            "locationRestriction": {
                "circle": {
                    "center": {"latitude": lat, "longitude": long},
                    "radius": radius_m,
                }
            }
        });

        tracing::debug!(lat, long, category, radius_m, "Searching nearby places");

        let response = self
            .http
            .post(&self.nearby_search_url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header(
                "X-Goog-FieldMask",
                "places.displayName,places.location,places.photos",
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Nearby search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(upstream_status_error("Nearby search", status, response).await);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse nearby response: {}", e)))
    }
}

async fn parse_geocode_response(response: reqwest::Response) -> Result<GeocodeResponse, AppError> {
    let status = response.status();
    if !status.is_success() {
        return Err(upstream_status_error("Geocode", status, response).await);
    }
    response
        .json::<GeocodeResponse>()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to parse geocode response: {}", e)))
}

async fn upstream_status_error(
    what: &str,
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> AppError {
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());
    tracing::error!(
        status_code = status.as_u16(),
        error_body = %error_body,
        "{} returned error status", what
    );
    AppError::Upstream(format!(
        "{} returned status {}: {}",
        what,
        status.as_u16(),
        error_body
    ))
}
