//! Place orchestration pipeline
//!
//! The three operations the HTTP layer exposes, each a strictly sequential
//! chain over the upstream clients:
//!
//! 1. `generate_by_area` — model synthesizes candidates, the bounding box
//!    filters them, reverse geocoding enriches the survivors.
//! 2. `search_nearby` — single nearby-search call, payload passed through.
//! 3. `search_address_then_nearby` — forward geocode, nearby search, photo
//!    set-aside, model narration, photo reattach.
//!
//! The stages between awaits are pure functions so they can be unit-tested
//! without any HTTP transport. Nothing is kept between calls; every entity
//! lives and dies within one request.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::CredentialConfig;
use crate::error::AppError;
use crate::orchestrator::bounding_box::within_bounds;
use crate::orchestrator::defaults::PipelineDefaults;
use crate::orchestrator::gemini::GeminiClient;
use crate::orchestrator::maps::MapsClient;
use crate::orchestrator::types::{
    parse_model_array, photo_key, salvage_entries, EnrichedPlace, PlaceCandidate, StoryPlace,
};

/// Stateless orchestrator over the completion and Maps capabilities
///
/// Credentials are injected at construction; no module reads ambient process
/// state after startup.
#[derive(Debug, Clone)]
pub struct PlaceOrchestrator {
    gemini: GeminiClient,
    maps: MapsClient,
    defaults: PipelineDefaults,
}

/// Result of `generate_by_area`
///
/// When the model produces an empty list the caller gets the raw model text
/// back instead of an empty array, so there is something to inspect.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerateOutcome {
    /// Candidates that survived filtering and geocode enrichment
    Places(Vec<EnrichedPlace>),
    /// Degraded outcome: the model produced nothing usable
    Degraded {
        /// The area name from the original query
        name: String,
        /// The model's raw text response
        ai_description: String,
    },
}

impl PlaceOrchestrator {
    /// Build an orchestrator against the production endpoints
    pub fn new(credentials: &CredentialConfig, defaults: PipelineDefaults) -> Self {
        let http = reqwest::Client::new();
        let gemini = GeminiClient::new(
            http.clone(),
            credentials.gemini_api_key.clone(),
            defaults.gemini_base_url.clone(),
            defaults.gemini_model.clone(),
        );
        let maps = MapsClient::new(
            http,
            credentials.maps_api_key.clone(),
            defaults.geocode_url.clone(),
            defaults.nearby_search_url.clone(),
        );
        Self {
            gemini,
            maps,
            defaults,
        }
    }

    /// Build an orchestrator from preconfigured clients
    ///
    /// Used by tests to point both clients at mock servers.
    pub fn with_clients(
        gemini: GeminiClient,
        maps: MapsClient,
        defaults: PipelineDefaults,
    ) -> Self {
        Self {
            gemini,
            maps,
            defaults,
        }
    }

    /// Ask the model for places in an area, then filter and geocode them
    ///
    /// `place_type` qualifies the area name in the prompt (e.g. "city" or
    /// "district"); the default qualifier is "Kota/Kabupaten".
    pub async fn generate_by_area(
        &self,
        area_name: &str,
        category: &str,
        place_type: Option<&str>,
    ) -> Result<GenerateOutcome, AppError> {
        let prompt = build_generation_prompt(area_name, category, place_type);
        let raw_text = self.gemini.generate(&prompt).await?;

        let entries = parse_model_array(&raw_text)?;
        if entries.is_empty() {
            tracing::info!(area = area_name, "Model generated no candidates");
            return Ok(GenerateOutcome::Degraded {
                name: area_name.to_string(),
                ai_description: raw_text,
            });
        }

        let candidates: Vec<PlaceCandidate> = salvage_entries(entries);
        let filtered = filter_candidates(candidates);

        // One sequential lookup per candidate; latency is linear in the
        // candidate count, which is small in practice.
        let mut enriched = Vec::with_capacity(filtered.len());
        for candidate in filtered {
            let geocoded = self
                .maps
                .reverse_geocode(candidate.latitude, candidate.longitude)
                .await?;
            match geocoded.results.into_iter().next() {
                Some(first) => enriched.push(EnrichedPlace {
                    place: candidate,
                    address: first.formatted_address,
                }),
                None => {
                    tracing::warn!(
                        name = %candidate.name,
                        lat = candidate.latitude,
                        long = candidate.longitude,
                        "Location not found, dropping candidate"
                    );
                }
            }
        }

        Ok(GenerateOutcome::Places(enriched))
    }

    /// Delegate to nearby search and pass the payload through unmodified
    pub async fn search_nearby(
        &self,
        lat: f64,
        long: f64,
        category: &str,
        radius: Option<f64>,
    ) -> Result<Value, AppError> {
        let radius_m = effective_radius(radius, self.defaults.default_radius_m);
        self.maps
            .search_nearby(lat, long, category, radius_m, self.defaults.max_result_count)
            .await
    }

    /// Geocode an address, search nearby, then have the model narrate the results
    ///
    /// Photo references are set aside under a coordinate-string key before
    /// the place list is handed to the model, and reattached afterwards by
    /// recomputing the key from the model's returned coordinates. A drifted
    /// coordinate misses the join and the photos are omitted.
    pub async fn search_address_then_nearby(
        &self,
        address: &str,
        category: Option<&str>,
        radius: Option<f64>,
    ) -> Result<Vec<StoryPlace>, AppError> {
        let normalized = normalize_address(address);
        let geocoded = self.maps.forward_geocode(&normalized).await?;

        let first = geocoded
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .cloned();
        let Some(first) = first else {
            tracing::info!(address, "Forward geocode returned no results");
            return Err(AppError::NoData { resp: geocoded });
        };
        let (lat, long) = extract_location(&first).ok_or_else(|| {
            AppError::Upstream("Geocode result is missing coordinates".to_string())
        })?;

        let category = category
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.defaults.default_category);
        let radius_m = effective_radius(radius, self.defaults.default_radius_m);
        let nearby = self
            .maps
            .search_nearby(lat, long, category, radius_m, self.defaults.max_result_count)
            .await?;

        let places = nearby
            .get("places")
            .and_then(Value::as_array)
            .filter(|list| !list.is_empty())
            .cloned();
        let Some(usable) = places else {
            tracing::info!(lat, long, category, "Nearby search returned no places");
            return Err(AppError::NoData { resp: nearby });
        };

        let (bundles, stripped) = set_aside_photos(usable);

        let prompt = build_story_prompt(&stripped);
        let raw_text = self.gemini.generate(&prompt).await?;
        let entries = parse_model_array(&raw_text)?;
        let stories: Vec<StoryPlace> = salvage_entries(entries);

        Ok(reattach_photos(stories, &bundles))
    }
}

/// Build the candidate-generation prompt for an area and category
fn build_generation_prompt(area_name: &str, category: &str, place_type: Option<&str>) -> String {
    let qualifier = place_type.unwrap_or("Kota/Kabupaten");
    format!(
        "Generate a strict JSON array, with no markdown and no commentary, of objects \
         shaped {{\"name\": string, \"latitude\": double, \"longitude\": double, \
         \"describe\": string}} listing {} in {} {}, Indonesia. \
         Return [] if you know of none.",
        category, qualifier, area_name
    )
}

/// Build the narration prompt over a stripped nearby-place list
///
/// The list is embedded as JSON; photo payloads must already be removed,
/// they are not valid prompt content.
fn build_story_prompt(stripped_places: &[Value]) -> String {
    let embedded = serde_json::to_string(stripped_places).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Here is a JSON list of places: {}. For every place return one object in a \
         strict JSON array, with no markdown and no commentary, shaped \
         {{\"name\": string, \"latitude\": double, \"longitude\": double, \
         \"description\": string, \"maps_link\": string}}. Keep latitude and longitude \
         exactly as given. The description must tell the place's history, founding \
         story, and distinguishing facts. The maps_link must be a Google Maps URL for \
         the place.",
        embedded
    )
}

/// Keep only candidates whose coordinates fall inside the bounding box
///
/// Order is preserved; rejected candidates are dropped silently.
fn filter_candidates(candidates: Vec<PlaceCandidate>) -> Vec<PlaceCandidate> {
    candidates
        .into_iter()
        .filter(|c| within_bounds(c.latitude, c.longitude))
        .collect()
}

/// Resolve the search radius, falling back when absent or non-positive
fn effective_radius(radius: Option<f64>, default_radius_m: f64) -> f64 {
    match radius {
        Some(r) if r > 0.0 => r,
        _ => default_radius_m,
    }
}

/// Collapse runs of address whitespace to single spaces
///
/// The geocode client sends the address as a query parameter, so the space
/// separator is percent-encoded on the wire and decodes back to a space at
/// the provider. Joining with a literal `+` here would get encoded to `%2B`
/// and reach the provider as a plus character instead.
fn normalize_address(address: &str) -> String {
    address.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read `location.latitude`/`location.longitude` or geocode-style
/// `geometry.location.lat`/`lng` out of a place object
fn extract_location(place: &Value) -> Option<(f64, f64)> {
    if let Some(location) = place.get("location") {
        let lat = location.get("latitude")?.as_f64()?;
        let long = location.get("longitude")?.as_f64()?;
        return Some((lat, long));
    }
    let location = place.get("geometry")?.get("location")?;
    Some((
        location.get("lat")?.as_f64()?,
        location.get("lng")?.as_f64()?,
    ))
}

/// Set photo references aside and strip them from the place objects
///
/// Returns the photo bundles keyed by coordinate string and the stripped
/// list that is safe to embed in a prompt. A place without a readable
/// location keeps no bundle; its photos are simply lost.
fn set_aside_photos(places: Vec<Value>) -> (HashMap<String, Vec<Value>>, Vec<Value>) {
    let mut bundles: HashMap<String, Vec<Value>> = HashMap::new();
    let mut stripped = Vec::with_capacity(places.len());

    for mut place in places {
        let location = extract_location(&place);
        let photos = match place.as_object_mut() {
            Some(obj) => obj.remove("photos"),
            None => None,
        };
        if let (Some((lat, long)), Some(Value::Array(photo_list))) = (location, photos) {
            if !photo_list.is_empty() {
                bundles.insert(photo_key(lat, long), photo_list);
            }
        }
        stripped.push(place);
    }

    (bundles, stripped)
}

/// Rejoin photos to the model's regenerated places by coordinate key
fn reattach_photos(
    stories: Vec<StoryPlace>,
    bundles: &HashMap<String, Vec<Value>>,
) -> Vec<StoryPlace> {
    stories
        .into_iter()
        .map(|mut story| {
            let key = photo_key(story.latitude, story.longitude);
            if let Some(photos) = bundles.get(&key) {
                story.photos = photos.clone();
            }
            story
        })
        .collect()
}
