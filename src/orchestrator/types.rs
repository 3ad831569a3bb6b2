//! Domain types for the place pipeline
//!
//! Mirrors the JSON shapes exchanged with the model and the Maps endpoints,
//! plus the helpers that turn untrusted model text into typed entries. Model
//! output is salvaged entry by entry: one malformed element is skipped with
//! a warning instead of failing the whole batch.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// A place produced by the generation step
///
/// Unvalidated: coordinates may be missing, zeroed, or outside the target
/// country until the bounding-box filter has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Place name as generated by the model
    pub name: String,
    /// Latitude, untrusted
    pub latitude: f64,
    /// Longitude, untrusted
    pub longitude: f64,
    /// Optional free-text description from the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub describe: Option<String>,
}

/// A candidate that survived validation and geocode lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPlace {
    /// The validated candidate
    #[serde(flatten)]
    pub place: PlaceCandidate,
    /// Formatted address from the first reverse-geocode match
    pub address: String,
}

/// A nearby place after model re-enrichment
///
/// `photos` is reattached from the pre-prompt photo bundles keyed by
/// coordinate string; it stays empty when the model drifted the coordinates
/// and the join missed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryPlace {
    /// Place name as returned by the model
    pub name: String,
    /// Latitude as returned by the model
    pub latitude: f64,
    /// Longitude as returned by the model
    pub longitude: f64,
    /// Narrative description (history, founding story, distinguishing facts)
    #[serde(default)]
    pub description: String,
    /// Maps link string generated by the model
    #[serde(default)]
    pub maps_link: String,
    /// Photo references rejoined from the nearby-search results
    #[serde(default)]
    pub photos: Vec<Value>,
}

/// Build the coordinate join key used to reattach photos
///
/// Uses `f64` `Display` (shortest round-trip formatting), so the key only
/// matches when the model echoes the coordinates exactly. A rounded or
/// drifted coordinate misses the join and the photos are silently omitted.
pub fn photo_key(lat: f64, long: f64) -> String {
    format!("{}-{}", lat, long)
}

/// Strip a markdown code fence from model output, if present
///
/// Models asked for strict JSON still routinely wrap it in ```` ```json ````
/// fences. Returns the inner content, or the input unchanged when no fence
/// is found.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parse model output as a JSON array
///
/// A JSON `null` counts as an empty sequence: the model answering "nothing"
/// degrades the request instead of failing it.
///
/// # Errors
/// Returns [`AppError::ModelResponse`] when the text is not JSON or the
/// top-level value is neither an array nor `null`.
pub fn parse_model_array(text: &str) -> Result<Vec<Value>, AppError> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| AppError::ModelResponse(format!("{} - raw text: {}", e, text)))?;
    match value {
        Value::Array(entries) => Ok(entries),
        Value::Null => Ok(Vec::new()),
        other => Err(AppError::ModelResponse(format!(
            "expected a JSON array, got: {}",
            other
        ))),
    }
}

/// Deserialize entries one by one, skipping malformed elements
///
/// A malformed entry is logged and dropped; it never fails the batch.
pub fn salvage_entries<T: DeserializeOwned>(entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<T>(entry.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, entry = %entry, "Skipping malformed model entry");
                None
            }
        })
        .collect()
}
