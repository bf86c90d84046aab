use crate::error::{AppError, Result};
use crate::models::{CongestionEvent, Port, Prediction, Shipment, WeatherEvent};
use crate::state::LogisticsStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory logistics store (reference implementation and test double)
#[derive(Clone)]
pub struct InMemoryStore {
    ports: Arc<DashMap<Uuid, Port>>,
    shipments: Arc<DashMap<Uuid, Shipment>>,
    weather_events: Arc<DashMap<Uuid, WeatherEvent>>,
    congestion_events: Arc<DashMap<Uuid, CongestionEvent>>,
    // Keyed by run id so a whole batch lands in one map insert
    predictions: Arc<DashMap<String, Vec<Prediction>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            ports: Arc::new(DashMap::new()),
            shipments: Arc::new(DashMap::new()),
            weather_events: Arc::new(DashMap::new()),
            congestion_events: Arc::new(DashMap::new()),
            predictions: Arc::new(DashMap::new()),
        }
    }

    /// Total number of stored predictions, across all runs
    pub fn prediction_count(&self) -> usize {
        self.predictions.iter().map(|entry| entry.value().len()).sum()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogisticsStore for InMemoryStore {
    async fn get_port(&self, id: &Uuid) -> Result<Option<Port>> {
        Ok(self.ports.get(id).map(|entry| entry.clone()))
    }

    async fn list_shipments(&self) -> Result<Vec<Shipment>> {
        Ok(self
            .shipments
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn list_open_shipments(&self) -> Result<Vec<Shipment>> {
        Ok(self
            .shipments
            .iter()
            .map(|entry| entry.value().clone())
            .filter(Shipment::is_open)
            .collect())
    }

    async fn list_weather_events(&self) -> Result<Vec<WeatherEvent>> {
        let mut events: Vec<WeatherEvent> = self
            .weather_events
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        // Stable order so "first matching event" is reproducible
        events.sort_by(|a, b| a.forecast_time.cmp(&b.forecast_time).then(a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn latest_congestion(&self, port_id: &Uuid) -> Result<Option<CongestionEvent>> {
        Ok(self
            .congestion_events
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|event| event.port_id == *port_id)
            .max_by_key(|event| event.recorded_at))
    }

    async fn insert_predictions(&self, predictions: &[Prediction]) -> Result<()> {
        let Some(first) = predictions.first() else {
            return Ok(());
        };
        if predictions
            .iter()
            .any(|prediction| prediction.run_id != first.run_id)
        {
            return Err(AppError::Validation(
                "prediction batch spans multiple runs".to_string(),
            ));
        }

        // One map entry per run: the batch becomes visible to readers in a
        // single insert, never record by record.
        self.predictions
            .insert(first.run_id.clone(), predictions.to_vec());
        tracing::debug!(
            run_id = %first.run_id,
            count = predictions.len(),
            "Prediction batch saved"
        );
        Ok(())
    }

    async fn list_predictions_by_run(&self, run_id: &str) -> Result<Vec<Prediction>> {
        let mut predictions = self
            .predictions
            .get(run_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        predictions.sort_by(|a, b| a.shipment_id.cmp(&b.shipment_id));
        Ok(predictions)
    }

    async fn save_port(&self, port: &Port) -> Result<()> {
        self.ports.insert(port.id, port.clone());
        Ok(())
    }

    async fn save_shipment(&self, shipment: &Shipment) -> Result<()> {
        self.shipments.insert(shipment.id, shipment.clone());
        Ok(())
    }

    async fn save_weather_event(&self, event: &WeatherEvent) -> Result<()> {
        self.weather_events.insert(event.id, event.clone());
        Ok(())
    }

    async fn save_congestion_event(&self, event: &CongestionEvent) -> Result<()> {
        self.congestion_events.insert(event.id, event.clone());
        Ok(())
    }
}
