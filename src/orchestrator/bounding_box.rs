//! Bounding-box validator
//!
//! Cheap sanity filter for model-generated coordinates: the generation step
//! is untrusted and may hallucinate points far outside the target country.
//! The box is the approximate extent of Indonesia; this is not true
//! geofencing, only a rectangle check.

/// Southernmost accepted latitude
pub const LAT_MIN: f64 = -11.0;
/// Northernmost accepted latitude
pub const LAT_MAX: f64 = 6.0;
/// Westernmost accepted longitude
pub const LONG_MIN: f64 = 95.0;
/// Easternmost accepted longitude
pub const LONG_MAX: f64 = 141.0;

/// Check whether a coordinate pair falls inside the Indonesia bounding box
///
/// A coordinate of exactly zero is treated as missing, so `(0, 0)` (a common
/// "no data" placeholder in model output) never passes. NaN fails the range
/// comparisons and is rejected the same way.
pub fn within_bounds(lat: f64, long: f64) -> bool {
    if lat == 0.0 || long == 0.0 {
        return false;
    }
    (LAT_MIN..=LAT_MAX).contains(&lat) && (LONG_MIN..=LONG_MAX).contains(&long)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_points_inside_indonesia() {
        assert!(within_bounds(-6.9, 107.6)); // Bandung
        assert!(within_bounds(-8.65, 115.22)); // Denpasar
        assert!(within_bounds(5.55, 95.32)); // Banda Aceh
    }

    #[test]
    fn rejects_latitude_outside_box() {
        assert!(!within_bounds(50.0, 107.0));
        assert!(!within_bounds(-11.01, 107.0));
        assert!(!within_bounds(6.01, 107.0));
    }

    #[test]
    fn rejects_longitude_outside_box() {
        assert!(!within_bounds(-6.9, 94.99));
        assert!(!within_bounds(-6.9, 141.01));
        assert!(!within_bounds(-6.9, -107.6));
    }

    #[test]
    fn accepts_box_edges() {
        assert!(within_bounds(LAT_MIN, LONG_MIN));
        assert!(within_bounds(LAT_MAX, LONG_MAX));
    }

    #[test]
    fn rejects_zero_coordinates_as_missing() {
        assert!(!within_bounds(0.0, 107.6));
        assert!(!within_bounds(-6.9, 0.0));
        assert!(!within_bounds(0.0, 0.0));
    }

    #[test]
    fn rejects_nan() {
        assert!(!within_bounds(f64::NAN, 107.6));
        assert!(!within_bounds(-6.9, f64::NAN));
    }
}
