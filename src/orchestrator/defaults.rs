//! Pipeline defaults
//!
//! Centralized defaults for the place pipeline: upstream endpoints, the
//! completion model, and the tuning knobs the route handlers fall back to.
//! Tests override the endpoint URLs to point at mock servers.

/// Tunable defaults for the place pipeline
#[derive(Debug, Clone)]
pub struct PipelineDefaults {
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// Google geocoding API endpoint (forward and reverse)
    pub geocode_url: String,
    /// Google Places nearby-search endpoint
    pub nearby_search_url: String,
    /// Search radius in meters applied when the request omits one
    pub default_radius_m: f64,
    /// Maximum number of places requested from nearby search
    pub max_result_count: u32,
    /// Place category applied when an address search omits one
    pub default_category: String,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            geocode_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            nearby_search_url: "https://places.googleapis.com/v1/places:searchNearby".to_string(),
            default_radius_m: 1000.0,
            max_result_count: 30,
            default_category: "tourist_attraction".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_endpoints() {
        let defaults = PipelineDefaults::default();
        assert_eq!(defaults.default_radius_m, 1000.0);
        assert_eq!(defaults.max_result_count, 30);
        assert!(defaults.gemini_base_url.starts_with("https://"));
        assert!(defaults.geocode_url.contains("maps.googleapis.com"));
        assert!(defaults.nearby_search_url.contains("searchNearby"));
    }
}
