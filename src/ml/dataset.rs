use crate::ml::features::FEATURE_COUNT;
use crate::models::Shipment;
use ndarray::Array2;

/// Arrival lateness, in hours, beyond which a historical shipment counts as
/// delayed. Hand-tuned in the original system; preserved verbatim.
pub const DELAY_LABEL_THRESHOLD_HOURS: f64 = 12.0;

/// One (feature vector, outcome) pair for training
#[derive(Debug, Clone)]
pub struct TrainingSample {
    /// Feature vector, in the fixed extraction order
    pub features: [f64; FEATURE_COUNT],

    /// True when the shipment's observed outcome was a delay
    pub delayed: bool,
}

/// Training dataset assembled from historical shipments
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// Feature matrix (n_samples × FEATURE_COUNT)
    pub features: Array2<f64>,

    /// Binary delayed labels, aligned with the feature rows
    pub labels: Vec<u8>,

    /// Number of samples
    pub n_samples: usize,
}

impl TrainingDataset {
    /// Build the feature matrix and label vector from samples
    pub fn from_samples(samples: &[TrainingSample]) -> Self {
        let n_samples = samples.len();
        let mut features = Array2::zeros((n_samples, FEATURE_COUNT));
        let mut labels = Vec::with_capacity(n_samples);

        for (row, sample) in samples.iter().enumerate() {
            for (col, &value) in sample.features.iter().enumerate() {
                features[[row, col]] = value;
            }
            labels.push(u8::from(sample.delayed));
        }

        Self {
            features,
            labels,
            n_samples,
        }
    }

    /// Number of positive (delayed) labels
    pub fn n_delayed(&self) -> usize {
        self.labels.iter().filter(|&&label| label == 1).count()
    }
}

/// Outcome label for a historical shipment.
///
/// A shipment is delayed when its observed arrival ran more than 12 hours
/// past plan; when no arrival was observed, the recorded `delayed` status is
/// used as the fallback signal.
pub fn delay_label(shipment: &Shipment) -> bool {
    match shipment.eta_actual {
        Some(actual) => {
            let late_hours = (actual - shipment.eta_planned).num_seconds() as f64 / 3600.0;
            late_hours > DELAY_LABEL_THRESHOLD_HOURS
        }
        None => shipment.status == crate::models::ShipmentStatus::Delayed,
    }
}
