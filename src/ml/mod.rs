/// Risk-scoring pipeline for shipment delay prediction
///
/// This module holds the only non-trivial logic in the system:
/// - Feature extraction from route, cargo, weather, and congestion signals
/// - Standardization fit once at training time and reused at scoring time
/// - A gradient-boosted binary classifier producing P(delayed)
/// - Post-processing into delay hours, a risk tier, and ranked factors
/// - The training procedure and the batch prediction runner

pub mod artifacts;
pub mod classifier;
pub mod dataset;
pub mod explain;
pub mod features;
pub mod scaler;
pub mod scorer;
pub mod service;

pub use artifacts::ArtifactStore;
pub use classifier::{BoostingParams, GradientBoostedTrees};
pub use dataset::{delay_label, TrainingDataset, TrainingSample};
pub use explain::{explain, risk_factors};
pub use features::{extract, is_nearby, FEATURE_COUNT};
pub use scaler::StandardScaler;
pub use scorer::{delay_hours, risk_tier, RiskScore, RiskScorer};
pub use service::{PredictionService, TrainingReport};
