use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// A shipment moving between two ports. Owned by the persistence layer;
/// the scoring core only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique identifier
    pub id: Uuid,

    /// Business identifier, e.g. "SHP-1042"
    pub shipment_code: String,

    /// Origin port
    pub origin_port_id: Uuid,

    /// Destination port
    pub dest_port_id: Uuid,

    /// Carrier name
    pub carrier: String,

    /// Vessel name
    pub vessel_name: String,

    /// Estimated time of departure
    pub etd: DateTime<Utc>,

    /// Planned arrival
    pub eta_planned: DateTime<Utc>,

    /// Actual arrival, once observed
    pub eta_actual: Option<DateTime<Utc>>,

    /// Lifecycle status
    pub status: ShipmentStatus,

    /// Declared cargo value in USD
    pub value_usd: f64,

    /// Cargo category
    pub cargo_type: String,

    /// Great-circle route distance in nautical miles. Zero or absent means
    /// unknown; the snapshot loader derives it from the port coordinates.
    #[serde(default)]
    pub route_distance_nm: f64,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    /// True for shipments that have not yet resolved to an outcome
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            ShipmentStatus::Pending | ShipmentStatus::InTransit
        )
    }
}

/// Shipment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    OnTime,
    Delayed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn test_shipment(status: ShipmentStatus) -> Shipment {
        let now = Utc::now();
        Shipment {
            id: Uuid::new_v4(),
            shipment_code: "SHP-1000".to_string(),
            origin_port_id: Uuid::new_v4(),
            dest_port_id: Uuid::new_v4(),
            carrier: "Maersk".to_string(),
            vessel_name: "Ocean Trader".to_string(),
            etd: now,
            eta_planned: now + chrono::Duration::days(10),
            eta_actual: None,
            status,
            value_usd: 250_000.0,
            cargo_type: "Electronics".to_string(),
            route_distance_nm: 4800.0,
            created_at: now,
        }
    }

    #[test]
    fn test_is_open() {
        assert!(test_shipment(ShipmentStatus::Pending).is_open());
        assert!(test_shipment(ShipmentStatus::InTransit).is_open());
        assert!(!test_shipment(ShipmentStatus::OnTime).is_open());
        assert!(!test_shipment(ShipmentStatus::Delayed).is_open());
    }

    #[test]
    fn test_status_string_round_trip() {
        assert_eq!(ShipmentStatus::InTransit.to_string(), "in_transit");
        assert_eq!(
            ShipmentStatus::from_str("delayed").unwrap(),
            ShipmentStatus::Delayed
        );
    }
}
