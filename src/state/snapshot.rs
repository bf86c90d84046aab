use crate::error::Result;
use crate::models::{CongestionEvent, Port, Shipment, WeatherEvent};
use crate::state::{InMemoryStore, LogisticsStore};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A JSON snapshot of the operational dataset, used by the CLI to stand in
/// for the external relational store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub ports: Vec<Port>,

    #[serde(default)]
    pub shipments: Vec<Shipment>,

    #[serde(default)]
    pub weather_events: Vec<WeatherEvent>,

    #[serde(default)]
    pub congestion_events: Vec<CongestionEvent>,
}

impl Snapshot {
    /// Read a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load the snapshot into an in-memory store.
    ///
    /// Shipments without a route distance get the great-circle distance
    /// between their origin and destination ports.
    pub async fn into_store(self) -> Result<InMemoryStore> {
        let store = InMemoryStore::new();
        for port in &self.ports {
            store.save_port(port).await?;
        }
        for shipment in &self.shipments {
            let mut shipment = shipment.clone();
            if shipment.route_distance_nm <= 0.0 {
                let origin = self.port(&shipment.origin_port_id);
                let dest = self.port(&shipment.dest_port_id);
                if let (Some(origin), Some(dest)) = (origin, dest) {
                    shipment.route_distance_nm = origin.distance_nm(dest);
                }
            }
            store.save_shipment(&shipment).await?;
        }
        for event in &self.weather_events {
            store.save_weather_event(event).await?;
        }
        for event in &self.congestion_events {
            store.save_congestion_event(event).await?;
        }

        tracing::info!(
            ports = self.ports.len(),
            shipments = self.shipments.len(),
            weather_events = self.weather_events.len(),
            congestion_events = self.congestion_events.len(),
            "Dataset snapshot loaded"
        );
        Ok(store)
    }

    fn port(&self, id: &uuid::Uuid) -> Option<&Port> {
        self.ports.iter().find(|port| port.id == *id)
    }
}
