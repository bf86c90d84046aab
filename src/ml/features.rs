use crate::models::{CongestionEvent, Port, Shipment, WeatherEvent};
use chrono::{DateTime, Utc};

/// Length of every feature vector produced by [`extract`]
pub const FEATURE_COUNT: usize = 7;

/// Bounding-box half-width, in degrees, of the "nearby" weather test
pub const NEARBY_DEGREES: f64 = 5.0;

/// Proximity test between a weather event and a port.
///
/// This is a coarse ±5° latitude/longitude bounding box, not a great-circle
/// distance; the asymmetry with the haversine route distance is deliberate
/// and must be kept for compatibility with historical scores.
pub fn is_nearby(event: &WeatherEvent, port: &Port) -> bool {
    (event.latitude - port.latitude).abs() < NEARBY_DEGREES
        && (event.longitude - port.longitude).abs() < NEARBY_DEGREES
}

/// Convert a shipment plus its contextual signals into the fixed-order
/// 7-element feature vector.
///
/// Extraction never fails: a missing destination port, congestion reading,
/// or weather context degrades each affected feature to 0.
pub fn extract(
    shipment: &Shipment,
    weather_events: &[WeatherEvent],
    congestion: Option<&CongestionEvent>,
    dest_port: Option<&Port>,
    now: DateTime<Utc>,
) -> [f64; FEATURE_COUNT] {
    // 1. Route distance, normalized against a 10,000 nm trunk route
    let distance = shipment.route_distance_nm / 10_000.0;

    // 2. Days until planned arrival, clamped at 0 for overdue shipments
    let days_to_eta = (shipment.eta_planned - now).num_seconds() as f64 / 86_400.0;
    let eta_horizon = days_to_eta.max(0.0) / 30.0;

    // 3. Declared value against a $1M reference cargo
    let value = shipment.value_usd / 1_000_000.0;

    // 4/5. Wind and storm signals from weather near the destination
    let nearby: Vec<&WeatherEvent> = match dest_port {
        Some(port) => weather_events
            .iter()
            .filter(|event| is_nearby(event, port))
            .collect(),
        None => Vec::new(),
    };

    let max_wind = nearby
        .iter()
        .map(|event| event.wind_speed_kts)
        .fold(0.0_f64, f64::max)
        / 100.0;

    let has_storm = if nearby.iter().any(|event| event.storm_flag) {
        1.0
    } else {
        0.0
    };

    // 6/7. Latest destination congestion reading, absent reads as calm
    let congestion_wait = congestion.map_or(0.0, |event| event.avg_wait_hours) / 48.0;
    let congestion_queue = congestion.map_or(0.0, |event| f64::from(event.queue_length)) / 50.0;

    [
        distance,
        eta_horizon,
        value,
        max_wind,
        has_storm,
        congestion_wait,
        congestion_queue,
    ]
}
