use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fitted-artifact storage configuration
    pub artifacts: ArtifactsConfig,

    /// Model hyperparameters
    pub model: ModelConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (SHIPRISK__SECTION__KEY)
            .add_source(
                config::Environment::with_prefix("SHIPRISK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

/// Fitted-artifact storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the scaler and classifier blobs
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
        }
    }
}

/// Gradient-boosting hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of boosting rounds
    #[serde(default = "default_n_rounds")]
    pub n_rounds: usize,

    /// Shrinkage applied to each tree's contribution
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Maximum depth of each weak-learner tree
    #[serde(default = "default_max_depth")]
    pub max_depth: u16,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_rounds: default_n_rounds(),
            learning_rate: default_learning_rate(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("data/models")
}

fn default_n_rounds() -> usize {
    100
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_max_depth() -> u16 {
    3
}
