//! Predictor configuration

use serde::Deserialize;

/// Model artifact locations for the prediction façade
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Path to the PM2.5 regression model artifact
    #[serde(default = "default_regression_model_path")]
    pub regression_model_path: String,

    /// Path to the air quality classification model artifact
    #[serde(default = "default_classification_model_path")]
    pub classification_model_path: String,
}

fn default_regression_model_path() -> String {
    "regression_model.json".to_string()
}

fn default_classification_model_path() -> String {
    "classification_model.json".to_string()
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            regression_model_path: default_regression_model_path(),
            classification_model_path: default_classification_model_path(),
        }
    }
}

impl PredictorConfig {
    /// Load configuration from `AIRQ_`-prefixed environment variables
    ///
    /// Unset fields fall back to the default artifact paths next to the
    /// working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("AIRQ"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }
}
