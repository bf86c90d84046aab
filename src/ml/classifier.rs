use crate::config::ModelConfig;
use crate::error::{AppError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};

type RegressionTree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Gradient-boosting hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostingParams {
    /// Number of boosting rounds
    pub n_rounds: usize,

    /// Shrinkage applied to each tree's contribution
    pub learning_rate: f64,

    /// Maximum depth of each weak-learner tree
    pub max_depth: u16,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_rounds: 100,
            learning_rate: 0.1,
            max_depth: 3,
        }
    }
}

impl From<&ModelConfig> for BoostingParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            n_rounds: config.n_rounds,
            learning_rate: config.learning_rate,
            max_depth: config.max_depth,
        }
    }
}

/// Binary delay classifier: an ensemble of shallow regression trees trained
/// by stage-wise gradient boosting under logistic loss.
///
/// The fit is fully deterministic (no row or feature subsampling), so
/// retraining on identical data reproduces identical probabilities.
#[derive(Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    params: BoostingParams,
    model: ModelState,
}

/// Fitted/unfitted is an explicit state, not a nullable field
#[derive(Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum ModelState {
    Unfitted,
    Fitted(FittedEnsemble),
}

#[derive(Serialize, Deserialize)]
struct FittedEnsemble {
    /// Log-odds of the training prior, the boosting starting point
    base_score: f64,

    /// Weak learners, one per completed round
    trees: Vec<RegressionTree>,
}

impl GradientBoostedTrees {
    pub fn new() -> Self {
        Self::with_params(BoostingParams::default())
    }

    pub fn with_params(params: BoostingParams) -> Self {
        Self {
            params,
            model: ModelState::Unfitted,
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.model, ModelState::Fitted(_))
    }

    /// Train on a scaled feature matrix and binary delayed labels.
    ///
    /// A single-class label set cannot produce a usable probability surface
    /// and fails with [`AppError::DegenerateTrainingSet`].
    pub fn fit(&mut self, features: &Array2<f64>, labels: &[u8]) -> Result<()> {
        let n_samples = features.nrows();
        if n_samples == 0 || labels.len() != n_samples {
            return Err(AppError::Validation(format!(
                "feature matrix has {} rows but {} labels",
                n_samples,
                labels.len()
            )));
        }

        let n_delayed = labels.iter().filter(|&&label| label == 1).count();
        if n_delayed == 0 || n_delayed == n_samples {
            return Err(AppError::DegenerateTrainingSet(format!(
                "all {} training samples share one label (delayed: {})",
                n_samples, n_delayed
            )));
        }

        let prior = n_delayed as f64 / n_samples as f64;
        let base_score = (prior / (1.0 - prior)).ln();

        let x = to_dense_matrix(features);
        let mut scores = vec![base_score; n_samples];
        let mut trees: Vec<RegressionTree> = Vec::with_capacity(self.params.n_rounds);

        for _round in 0..self.params.n_rounds {
            // Negative gradient of the logistic loss: label minus current
            // predicted probability
            let residuals: Vec<f64> = labels
                .iter()
                .zip(scores.iter())
                .map(|(&label, &score)| f64::from(label) - sigmoid(score))
                .collect();

            let tree_params =
                DecisionTreeRegressorParameters::default().with_max_depth(self.params.max_depth);
            let tree = RegressionTree::fit(&x, &residuals, tree_params)
                .map_err(|e| AppError::Internal(format!("failed to fit boosting tree: {}", e)))?;

            let predictions = tree
                .predict(&x)
                .map_err(|e| AppError::Internal(format!("boosting tree prediction failed: {}", e)))?;

            for (score, prediction) in scores.iter_mut().zip(predictions.iter()) {
                *score += self.params.learning_rate * prediction;
            }

            trees.push(tree);
        }

        self.model = ModelState::Fitted(FittedEnsemble { base_score, trees });
        Ok(())
    }

    /// P(delayed) for one scaled feature vector, in [0, 1]
    pub fn predict_probability(&self, features: &Array1<f64>) -> Result<f64> {
        let ensemble = match &self.model {
            ModelState::Fitted(ensemble) => ensemble,
            ModelState::Unfitted => {
                return Err(AppError::ModelNotFitted(
                    "classifier used before fit or load".to_string(),
                ))
            }
        };

        let row = DenseMatrix::new(1, features.len(), features.to_vec(), false);

        let mut score = ensemble.base_score;
        for tree in &ensemble.trees {
            let prediction = tree
                .predict(&row)
                .map_err(|e| AppError::Internal(format!("boosting tree prediction failed: {}", e)))?;
            score += self.params.learning_rate * prediction[0];
        }

        Ok(sigmoid(score))
    }
}

impl Default for GradientBoostedTrees {
    fn default() -> Self {
        Self::new()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn to_dense_matrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
    let shape = arr.shape();
    let data: Vec<f64> = arr.iter().copied().collect();
    DenseMatrix::new(shape[0], shape[1], data, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Two clusters split on the first feature; labels follow the cluster
    fn separable_dataset() -> (Array2<f64>, Vec<u8>) {
        let mut rows: Vec<[f64; 2]> = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            let jitter = (i % 5) as f64 * 0.01;
            rows.push([0.1 + jitter, 0.2 + jitter]);
            labels.push(0);
            rows.push([0.9 + jitter, 0.8 + jitter]);
            labels.push(1);
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let features = Array2::from_shape_vec((rows.len(), 2), flat).unwrap();
        (features, labels)
    }

    #[test]
    fn test_unfitted_prediction_is_an_error() {
        let model = GradientBoostedTrees::new();
        let result = model.predict_probability(&array![0.5, 0.5]);
        assert!(matches!(result, Err(AppError::ModelNotFitted(_))));
    }

    #[test]
    fn test_fit_and_separate() {
        let (features, labels) = separable_dataset();
        let mut model = GradientBoostedTrees::with_params(BoostingParams {
            n_rounds: 25,
            ..BoostingParams::default()
        });

        assert!(!model.is_fitted());
        model.fit(&features, &labels).unwrap();
        assert!(model.is_fitted());

        let low = model.predict_probability(&array![0.1, 0.2]).unwrap();
        let high = model.predict_probability(&array![0.9, 0.8]).unwrap();

        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
        assert!(high > 0.8, "delayed cluster got {}", high);
        assert!(low < 0.2, "on-time cluster got {}", low);
    }

    #[test]
    fn test_single_class_labels_are_degenerate() {
        let features = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];

        let mut model = GradientBoostedTrees::new();
        let all_zero = model.fit(&features, &[0, 0, 0]);
        assert!(matches!(all_zero, Err(AppError::DegenerateTrainingSet(_))));
        assert!(!model.is_fitted());

        let all_one = model.fit(&features, &[1, 1, 1]);
        assert!(matches!(all_one, Err(AppError::DegenerateTrainingSet(_))));
    }

    #[test]
    fn test_label_count_mismatch_is_rejected() {
        let features = array![[0.1, 0.2], [0.3, 0.4]];
        let mut model = GradientBoostedTrees::new();
        assert!(matches!(
            model.fit(&features, &[0]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_deterministic_refit() {
        let (features, labels) = separable_dataset();
        let params = BoostingParams {
            n_rounds: 10,
            ..BoostingParams::default()
        };

        let mut first = GradientBoostedTrees::with_params(params.clone());
        let mut second = GradientBoostedTrees::with_params(params);
        first.fit(&features, &labels).unwrap();
        second.fit(&features, &labels).unwrap();

        let input = array![0.4, 0.5];
        let a = first.predict_probability(&input).unwrap();
        let b = second.predict_probability(&input).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_serde_round_trip_preserves_probabilities() {
        let (features, labels) = separable_dataset();
        let mut model = GradientBoostedTrees::with_params(BoostingParams {
            n_rounds: 10,
            ..BoostingParams::default()
        });
        model.fit(&features, &labels).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let reloaded: GradientBoostedTrees = serde_json::from_str(&json).unwrap();

        let input = array![0.85, 0.75];
        let before = model.predict_probability(&input).unwrap();
        let after = reloaded.predict_probability(&input).unwrap();
        assert!((before - after).abs() < 1e-9);
    }
}
