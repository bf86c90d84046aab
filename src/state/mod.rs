pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::InMemoryStore;

use crate::error::Result;
use crate::models::{CongestionEvent, Port, Prediction, Shipment, WeatherEvent};
use async_trait::async_trait;
use uuid::Uuid;

/// Trait for the external persistence layer, as seen by the scoring core.
///
/// Reads supply the operational records; the only write is the per-run
/// prediction batch, which implementations must persist all-or-nothing so
/// readers never observe a partial run.
#[async_trait]
pub trait LogisticsStore: Send + Sync {
    /// Get a port by ID
    async fn get_port(&self, id: &Uuid) -> Result<Option<Port>>;

    /// List all shipments (historical and open)
    async fn list_shipments(&self) -> Result<Vec<Shipment>>;

    /// List shipments with status in {pending, in_transit}
    async fn list_open_shipments(&self) -> Result<Vec<Shipment>>;

    /// List all known weather events
    async fn list_weather_events(&self) -> Result<Vec<WeatherEvent>>;

    /// Most recently recorded congestion reading for a port, if any
    async fn latest_congestion(&self, port_id: &Uuid) -> Result<Option<CongestionEvent>>;

    /// Persist one batch of predictions atomically
    async fn insert_predictions(&self, predictions: &[Prediction]) -> Result<()>;

    /// List predictions belonging to one run
    async fn list_predictions_by_run(&self, run_id: &str) -> Result<Vec<Prediction>>;

    /// Save reference and operational records (seeding and tests)
    async fn save_port(&self, port: &Port) -> Result<()>;
    async fn save_shipment(&self, shipment: &Shipment) -> Result<()>;
    async fn save_weather_event(&self, event: &WeatherEvent) -> Result<()>;
    async fn save_congestion_event(&self, event: &CongestionEvent) -> Result<()>;
}
