use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// A forecast or observed weather event at a geographic point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEvent {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable location name
    pub location: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Event category, e.g. "Storm", "Fog", "High Winds"
    pub event_type: String,

    /// Severity label
    pub severity: String,

    /// Wind speed in knots
    pub wind_speed_kts: f64,

    /// Precipitation in millimetres
    pub precipitation_mm: f64,

    /// True when the event is storm-class
    pub storm_flag: bool,

    /// Forecast validity timestamp
    pub forecast_time: DateTime<Utc>,
}

/// A port congestion reading. Only the most recent reading per port is
/// consulted by the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CongestionEvent {
    /// Unique identifier
    pub id: Uuid,

    /// Port the reading applies to
    pub port_id: Uuid,

    /// Vessels waiting at anchor
    pub queue_length: u32,

    /// Average wait in hours
    pub avg_wait_hours: f64,

    /// Tier derived from the average wait
    pub congestion_tier: CongestionTier,

    /// When the reading was taken
    pub recorded_at: DateTime<Utc>,
}

impl CongestionEvent {
    pub fn new(
        port_id: Uuid,
        queue_length: u32,
        avg_wait_hours: f64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            port_id,
            queue_length,
            avg_wait_hours,
            congestion_tier: CongestionTier::from_wait_hours(avg_wait_hours),
            recorded_at,
        }
    }
}

/// Coarse classification of a port's average wait time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CongestionTier {
    Low,
    Medium,
    High,
}

impl CongestionTier {
    /// Derive the tier from an average wait: > 24 h high, > 12 h medium,
    /// otherwise low.
    pub fn from_wait_hours(avg_wait_hours: f64) -> Self {
        if avg_wait_hours > 24.0 {
            CongestionTier::High
        } else if avg_wait_hours > 12.0 {
            CongestionTier::Medium
        } else {
            CongestionTier::Low
        }
    }
}
