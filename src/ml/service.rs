use crate::config::ModelConfig;
use crate::error::{AppError, Result};
use crate::ml::artifacts::ArtifactStore;
use crate::ml::classifier::{BoostingParams, GradientBoostedTrees};
use crate::ml::dataset::{delay_label, TrainingDataset, TrainingSample};
use crate::ml::scaler::StandardScaler;
use crate::ml::scorer::RiskScorer;
use crate::ml::{explain, features};
use crate::models::Prediction;
use crate::state::LogisticsStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Summary of one training run
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Shipments the model was fit on
    pub n_samples: usize,

    /// How many of them carried the delayed label
    pub n_delayed: usize,
}

/// Risk prediction service: the two trigger-boundary operations.
///
/// [`train`](Self::train) fits and persists the scaler and classifier
/// artifacts; [`generate_predictions`](Self::generate_predictions) loads
/// them and scores every open shipment as one batch. Both are synchronous
/// one-shot calls, safe to re-run; each prediction run is independent and
/// mints its own run identifier.
pub struct PredictionService {
    store: Arc<dyn LogisticsStore>,
    artifacts: ArtifactStore,
    model_config: ModelConfig,
}

impl PredictionService {
    pub fn new(
        store: Arc<dyn LogisticsStore>,
        artifacts: ArtifactStore,
        model_config: ModelConfig,
    ) -> Self {
        Self {
            store,
            artifacts,
            model_config,
        }
    }

    /// Fit the scaler and classifier on the full historical shipment set and
    /// persist both artifacts.
    ///
    /// Fails with [`AppError::DegenerateTrainingSet`] when every historical
    /// shipment carries the same label; nothing is persisted in that case.
    pub async fn train(&self) -> Result<TrainingReport> {
        let shipments = self.store.list_shipments().await?;
        if shipments.is_empty() {
            return Err(AppError::Validation(
                "no historical shipments available for training".to_string(),
            ));
        }

        let weather_events = self.store.list_weather_events().await?;
        let now = Utc::now();

        let mut samples = Vec::with_capacity(shipments.len());
        for shipment in &shipments {
            let dest_port = self.store.get_port(&shipment.dest_port_id).await?;
            let congestion = self.store.latest_congestion(&shipment.dest_port_id).await?;

            samples.push(TrainingSample {
                features: features::extract(
                    shipment,
                    &weather_events,
                    congestion.as_ref(),
                    dest_port.as_ref(),
                    now,
                ),
                delayed: delay_label(shipment),
            });
        }

        let dataset = TrainingDataset::from_samples(&samples);
        let n_delayed = dataset.n_delayed();

        let mut scaler = StandardScaler::new();
        scaler.fit(&dataset.features)?;
        let scaled = scaler.transform_matrix(&dataset.features)?;

        let mut classifier =
            GradientBoostedTrees::with_params(BoostingParams::from(&self.model_config));
        classifier.fit(&scaled, &dataset.labels)?;

        self.artifacts.save_scaler(&scaler)?;
        self.artifacts.save_classifier(&classifier)?;

        info!(
            n_samples = dataset.n_samples,
            n_delayed, "Model trained and artifacts saved"
        );

        Ok(TrainingReport {
            n_samples: dataset.n_samples,
            n_delayed,
        })
    }

    /// Score every open shipment (status pending or in_transit) and persist
    /// one prediction per shipment as a single batch. Returns the run
    /// identifier shared by the batch.
    pub async fn generate_predictions(&self) -> Result<String> {
        let scorer = self.load_scorer()?;
        if !scorer.is_fitted() {
            warn!("No fitted model artifacts found; scoring with safe defaults");
        }

        let shipments = self.store.list_open_shipments().await?;
        let weather_events = self.store.list_weather_events().await?;
        let run_id = new_run_id();
        let now = Utc::now();

        let mut batch = Vec::with_capacity(shipments.len());
        for shipment in &shipments {
            let dest_port = self.store.get_port(&shipment.dest_port_id).await?;
            let congestion = self.store.latest_congestion(&shipment.dest_port_id).await?;

            let score = scorer.score(
                shipment,
                &weather_events,
                congestion.as_ref(),
                dest_port.as_ref(),
                now,
            )?;

            let risk_factors = explain::explain(
                shipment,
                &weather_events,
                congestion.as_ref(),
                dest_port.as_ref(),
            );

            batch.push(Prediction {
                id: Uuid::new_v4(),
                shipment_id: shipment.id,
                run_id: run_id.clone(),
                delay_probability: score.delay_probability,
                predicted_delay_hours: score.predicted_delay_hours,
                risk_tier: score.risk_tier,
                risk_factors,
                generated_at: now,
            });
        }

        self.store.insert_predictions(&batch).await?;

        info!(
            run_id = %run_id,
            count = batch.len(),
            "Prediction batch generated"
        );
        Ok(run_id)
    }

    /// Build a scorer from the persisted artifacts. Absence of either blob
    /// is normal and yields an untrained scorer; read failures propagate.
    fn load_scorer(&self) -> Result<RiskScorer> {
        match (self.artifacts.load_scaler()?, self.artifacts.load_classifier()?) {
            (Some(scaler), Some(classifier)) => Ok(RiskScorer::new(scaler, classifier)),
            _ => Ok(RiskScorer::untrained()),
        }
    }
}

/// Short random token grouping one batch execution. Collisions are
/// negligible at 32 random bits but not guaranteed impossible.
fn new_run_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
