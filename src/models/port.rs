use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Earth radius in nautical miles, as used for great-circle route distances
const EARTH_RADIUS_NM: f64 = 3440.065;

/// A seaport. Immutable reference data for the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique identifier
    pub id: Uuid,

    /// UN/LOCODE-style port code, e.g. "NLRTM"
    pub code: String,

    /// Human-readable name
    pub name: String,

    /// Country
    pub country: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

impl Port {
    pub fn new(code: &str, name: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
        }
    }

    /// Great-circle distance from this port to another, in nautical miles
    pub fn distance_nm(&self, other: &Port) -> f64 {
        haversine_nm(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine great-circle distance between two points, in nautical miles
pub fn haversine_nm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_NM * c
}
