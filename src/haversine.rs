//! Great-circle distance and straight-line travel estimates.
//!
//! Used by the cost model while optimizing and as the fallback when the
//! routing provider cannot supply a road path. Ignores roads but is always
//! available.

/// Average driving speed assumed when no road timing is known.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Straight-line travel estimator.
///
/// Converts haversine distance into driving minutes at an assumed speed.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineEstimator {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for StraightLineEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl StraightLineEstimator {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in km to travel time in minutes.
    pub fn minutes_for_km(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }

    /// Distance (km) and travel time (minutes) between two points.
    pub fn estimate(&self, from: (f64, f64), to: (f64, f64)) -> (f64, f64) {
        let km = haversine_km(from, to);
        (km, self.minutes_for_km(km))
    }
}
