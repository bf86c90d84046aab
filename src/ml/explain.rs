use crate::ml::features::is_nearby;
use crate::models::{CongestionEvent, Port, Shipment, WeatherEvent};

/// Sentinel explanation when no risk factor applies
pub const NORMAL_CONDITIONS: &str = "Normal conditions";

/// Average wait, in hours, above which destination congestion is worth
/// calling out
pub const CONGESTION_FACTOR_THRESHOLD_HOURS: f64 = 12.0;

/// Route length, in nautical miles, above which distance itself is a factor
pub const LONG_ROUTE_THRESHOLD_NM: f64 = 8000.0;

/// Ordered list of human-readable risk factors for one shipment.
///
/// Rule-based and independent of the classifier: the factors inspect the
/// same raw signals the feature extractor sees, in a fixed priority order
/// (congestion, then weather, then distance).
pub fn risk_factors(
    shipment: &Shipment,
    weather_events: &[WeatherEvent],
    congestion: Option<&CongestionEvent>,
    dest_port: Option<&Port>,
) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(congestion) = congestion {
        if congestion.avg_wait_hours > CONGESTION_FACTOR_THRESHOLD_HOURS {
            factors.push(format!("Port congestion: {}", congestion.congestion_tier));
        }
    }

    if let Some(port) = dest_port {
        let nearby_storm = weather_events
            .iter()
            .find(|event| event.storm_flag && is_nearby(event, port));
        if let Some(storm) = nearby_storm {
            factors.push(format!("Weather: {}", storm.event_type));
        }
    }

    if shipment.route_distance_nm > LONG_ROUTE_THRESHOLD_NM {
        factors.push("Long distance route".to_string());
    }

    factors
}

/// Factors joined into one display string, or the sentinel when none apply
pub fn explain(
    shipment: &Shipment,
    weather_events: &[WeatherEvent],
    congestion: Option<&CongestionEvent>,
    dest_port: Option<&Port>,
) -> String {
    let factors = risk_factors(shipment, weather_events, congestion, dest_port);
    if factors.is_empty() {
        NORMAL_CONDITIONS.to_string()
    } else {
        factors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShipmentStatus;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn test_shipment(dest_port_id: Uuid, distance_nm: f64) -> Shipment {
        let now = Utc::now();
        Shipment {
            id: Uuid::new_v4(),
            shipment_code: "SHP-42".to_string(),
            origin_port_id: Uuid::new_v4(),
            dest_port_id,
            carrier: "Evergreen".to_string(),
            vessel_name: "Global Express".to_string(),
            etd: now,
            eta_planned: now + Duration::days(20),
            eta_actual: None,
            status: ShipmentStatus::InTransit,
            value_usd: 3_000_000.0,
            cargo_type: "Automobiles".to_string(),
            route_distance_nm: distance_nm,
            created_at: now,
        }
    }

    fn storm_near(port: &Port) -> WeatherEvent {
        WeatherEvent {
            id: Uuid::new_v4(),
            location: port.name.clone(),
            latitude: port.latitude + 1.0,
            longitude: port.longitude - 1.0,
            event_type: "Storm".to_string(),
            severity: "high".to_string(),
            wind_speed_kts: 70.0,
            precipitation_mm: 40.0,
            storm_flag: true,
            forecast_time: Utc::now(),
        }
    }

    #[test]
    fn test_all_factors_in_priority_order() {
        let port = Port::new("USLAX", "Los Angeles", "USA", 33.7701, -118.1937);
        let shipment = test_shipment(port.id, 9000.0);
        let weather = vec![storm_near(&port)];
        let congestion = CongestionEvent::new(port.id, 45, 20.0, Utc::now());

        let text = explain(&shipment, &weather, Some(&congestion), Some(&port));
        assert_eq!(
            text,
            "Port congestion: high, Weather: Storm, Long distance route"
        );
    }

    #[test]
    fn test_no_factors_yields_sentinel() {
        let port = Port::new("JPYKK", "Yokohama", "Japan", 35.4437, 139.6380);
        let shipment = test_shipment(port.id, 2000.0);
        let congestion = CongestionEvent::new(port.id, 5, 4.0, Utc::now());

        let text = explain(&shipment, &[], Some(&congestion), Some(&port));
        assert_eq!(text, NORMAL_CONDITIONS);
    }

    #[test]
    fn test_calm_congestion_is_omitted() {
        let port = Port::new("DEHAM", "Hamburg", "Germany", 53.5511, 9.9937);
        let shipment = test_shipment(port.id, 9500.0);
        // Exactly at the threshold: omitted (rule is strict >)
        let congestion = CongestionEvent::new(port.id, 10, 12.0, Utc::now());

        let text = explain(&shipment, &[], Some(&congestion), Some(&port));
        assert_eq!(text, "Long distance route");
    }

    #[test]
    fn test_storm_requires_known_destination() {
        let port = Port::new("AEDXB", "Dubai", "UAE", 25.2048, 55.2708);
        let shipment = test_shipment(port.id, 2000.0);
        let weather = vec![storm_near(&port)];

        // Destination port unresolved: the storm cannot be attributed
        let text = explain(&shipment, &weather, None, None);
        assert_eq!(text, NORMAL_CONDITIONS);
    }

    #[test]
    fn test_first_matching_storm_names_the_factor() {
        let port = Port::new("HKHKG", "Hong Kong", "Hong Kong", 22.3193, 114.1694);
        let shipment = test_shipment(port.id, 1000.0);

        let mut hurricane = storm_near(&port);
        hurricane.event_type = "Hurricane".to_string();
        let weather = vec![hurricane, storm_near(&port)];

        let text = explain(&shipment, &weather, None, Some(&port));
        assert_eq!(text, "Weather: Hurricane");
    }
}
