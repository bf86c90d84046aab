use crate::error::{AppError, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Per-feature standardization transform.
///
/// The fitted statistics are an explicit state, not nullable fields:
/// transforming through an unfitted scaler is a checked
/// [`AppError::ModelNotFitted`] usage error, never a silent pass-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StandardScaler {
    Unfitted,
    Fitted {
        /// Per-feature mean of the training corpus
        mean: Array1<f64>,

        /// Per-feature population standard deviation of the training corpus
        std: Array1<f64>,
    },
}

impl StandardScaler {
    pub fn new() -> Self {
        StandardScaler::Unfitted
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, StandardScaler::Fitted { .. })
    }

    /// Compute and store per-feature mean and standard deviation
    pub fn fit(&mut self, features: &Array2<f64>) -> Result<()> {
        let mean = features.mean_axis(Axis(0)).ok_or_else(|| {
            AppError::Validation("cannot fit scaler on an empty feature matrix".to_string())
        })?;

        // Population std (ddof = 0); constant features pass through unscaled
        let std = features
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });

        *self = StandardScaler::Fitted { mean, std };
        Ok(())
    }

    /// Apply (x - mean) / std to one feature vector
    pub fn transform(&self, features: &Array1<f64>) -> Result<Array1<f64>> {
        match self {
            StandardScaler::Fitted { mean, std } => Ok((features - mean) / std),
            StandardScaler::Unfitted => Err(AppError::ModelNotFitted(
                "scaler used before fit or load".to_string(),
            )),
        }
    }

    /// Apply the fitted transform to every row of a feature matrix
    pub fn transform_matrix(&self, features: &Array2<f64>) -> Result<Array2<f64>> {
        match self {
            StandardScaler::Fitted { mean, std } => Ok((features - mean) / std),
            StandardScaler::Unfitted => Err(AppError::ModelNotFitted(
                "scaler used before fit or load".to_string(),
            )),
        }
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}
