//! Prediction façade over the two loaded models
//!
//! Owns the regression and classification models for their whole
//! lifetime: both are loaded eagerly at construction and never reloaded.

use super::artifact::{ClassificationModel, RegressionModel};
use super::{Model, ModelKind};
use crate::config::PredictorConfig;
use crate::error::{ArtifactError, PredictorError, Result};
use crate::models::{EnvironmentalReading, FeatureVector, PredictionResult};
use crate::quality;
use std::fmt;
use std::path::Path;
use tracing::{debug, error, info};

/// Façade over the PM2.5 regression model and the air quality classifier
///
/// Construction is fail-fast: a value of this type only exists once both
/// models have loaded, so every prediction call finds them ready.
pub struct AirPollutionPredictor {
    regression: Option<Box<dyn Model<Output = f64>>>,
    classification: Option<Box<dyn Model<Output = i64>>>,
}

impl AirPollutionPredictor {
    /// Load both model artifacts eagerly
    ///
    /// Fails with [`PredictorError::ModelNotFound`] when an artifact file
    /// is missing and [`PredictorError::ModelLoad`] when one cannot be
    /// parsed or validated. No partially-loaded predictor is ever
    /// returned.
    pub fn new(
        regression_path: impl AsRef<Path>,
        classification_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let regression = load_model(
            ModelKind::Regression,
            regression_path.as_ref(),
            RegressionModel::from_path,
        )?;
        let classification = load_model(
            ModelKind::Classification,
            classification_path.as_ref(),
            ClassificationModel::from_path,
        )?;
        Ok(Self {
            regression: Some(Box::new(regression)),
            classification: Some(Box::new(classification)),
        })
    }

    /// Load both models from configured artifact paths
    pub fn from_config(config: &PredictorConfig) -> Result<Self> {
        Self::new(
            &config.regression_model_path,
            &config.classification_model_path,
        )
    }

    /// Build a predictor from already-constructed models
    pub fn with_models(
        regression: Box<dyn Model<Output = f64>>,
        classification: Box<dyn Model<Output = i64>>,
    ) -> Self {
        Self {
            regression: Some(regression),
            classification: Some(classification),
        }
    }

    /// True once both models are loaded
    pub fn is_ready(&self) -> bool {
        self.regression.is_some() && self.classification.is_some()
    }

    /// Assemble the model input vector in training order
    ///
    /// Pure assembly; values are passed through without validation or
    /// transformation.
    pub fn prepare_features(&self, reading: &EnvironmentalReading) -> FeatureVector {
        FeatureVector::from(reading)
    }

    /// Estimate the PM2.5 concentration, rounded to two decimal places
    pub fn predict_pm25(&self, features: &FeatureVector) -> Result<f64> {
        let model = self
            .regression
            .as_deref()
            .ok_or(PredictorError::ModelNotReady {
                kind: ModelKind::Regression,
            })?;

        let estimate = model.predict(features).map_err(|source| {
            error!(model = %ModelKind::Regression, error = %source, "Prediction failed");
            PredictorError::Prediction {
                kind: ModelKind::Regression,
                source,
            }
        })?;

        let pm25_level = round2(estimate);
        debug!(pm25_level, "PM2.5 prediction completed");
        Ok(pm25_level)
    }

    /// Estimate the air quality category code and its label
    ///
    /// Codes outside the known categories map to
    /// [`quality::UNKNOWN_LABEL`] rather than failing.
    pub fn predict_air_quality(&self, features: &FeatureVector) -> Result<(i64, &'static str)> {
        let model = self
            .classification
            .as_deref()
            .ok_or(PredictorError::ModelNotReady {
                kind: ModelKind::Classification,
            })?;

        let quality_index = model.predict(features).map_err(|source| {
            error!(model = %ModelKind::Classification, error = %source, "Prediction failed");
            PredictorError::Prediction {
                kind: ModelKind::Classification,
                source,
            }
        })?;

        let quality_label = quality::label_for_code(quality_index);
        debug!(quality_index, quality_label, "Air quality prediction completed");
        Ok((quality_index, quality_label))
    }

    /// Run both models on one set of readings
    ///
    /// Either model failing fails the whole call; there is no partial
    /// result.
    pub fn predict_both(&self, reading: &EnvironmentalReading) -> Result<PredictionResult> {
        let features = self.prepare_features(reading);
        let pm25_level = self.predict_pm25(&features)?;
        let (quality_index, quality_label) = self.predict_air_quality(&features)?;

        Ok(PredictionResult {
            pm25_level,
            quality_index,
            quality_label: quality_label.to_string(),
            inputs: *reading,
            generated_at: chrono::Utc::now().timestamp(),
        })
    }

    /// Health guidance for a quality label
    ///
    /// Total over all inputs; unrecognized labels get
    /// [`quality::NO_DESCRIPTION`].
    pub fn quality_description(label: &str) -> &'static str {
        quality::description_for_label(label)
    }
}

// The model slots hold trait objects without a `Debug` bound, so the
// formatter reports per-slot readiness instead of model internals.
impl fmt::Debug for AirPollutionPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirPollutionPredictor")
            .field("regression_loaded", &self.regression.is_some())
            .field("classification_loaded", &self.classification.is_some())
            .finish()
    }
}

fn load_model<M, F>(kind: ModelKind, path: &Path, from_path: F) -> Result<M>
where
    F: FnOnce(&Path) -> std::result::Result<M, ArtifactError>,
{
    if !path.exists() {
        error!(model = %kind, path = %path.display(), "Model artifact not found");
        return Err(PredictorError::ModelNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    match from_path(path) {
        Ok(model) => {
            info!(model = %kind, path = %path.display(), "Model loaded");
            Ok(model)
        }
        Err(source) => {
            error!(model = %kind, path = %path.display(), error = %source, "Model load failed");
            Err(PredictorError::ModelLoad {
                kind,
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Smallest magnitude at which every f64 is an integer (2^52)
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// Round to two decimal places, the precision shown to users
///
/// Estimates at or above `INTEGRAL_THRESHOLD` carry no fractional part
/// and pass through unscaled; multiplying them by 100 can overflow to
/// infinity.
fn round2(value: f64) -> f64 {
    if value.abs() >= INTEGRAL_THRESHOLD {
        return value;
    }
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::ModelError;
    use crate::quality::{NO_DESCRIPTION, UNKNOWN_LABEL};

    struct FixedRegression(f64);

    impl Model for FixedRegression {
        type Output = f64;

        fn predict(&self, _features: &FeatureVector) -> std::result::Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct FixedClassification(i64);

    impl Model for FixedClassification {
        type Output = i64;

        fn predict(&self, _features: &FeatureVector) -> std::result::Result<i64, ModelError> {
            Ok(self.0)
        }
    }

    struct FailingRegression;

    impl Model for FailingRegression {
        type Output = f64;

        fn predict(&self, _features: &FeatureVector) -> std::result::Result<f64, ModelError> {
            Err("regression backend exploded".into())
        }
    }

    struct FailingClassification;

    impl Model for FailingClassification {
        type Output = i64;

        fn predict(&self, _features: &FeatureVector) -> std::result::Result<i64, ModelError> {
            Err("classifier backend exploded".into())
        }
    }

    fn predictor_with(pm25: f64, code: i64) -> AirPollutionPredictor {
        AirPollutionPredictor::with_models(
            Box::new(FixedRegression(pm25)),
            Box::new(FixedClassification(code)),
        )
    }

    #[test]
    fn test_prepare_features_orders_inputs() {
        let predictor = predictor_with(0.0, 0);
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        assert_eq!(
            features.as_slice(),
            &[25.0, 50.0, 20.0, 15.0, 10.0, 1.0, 5.0, 500.0]
        );
    }

    #[test]
    fn test_predict_pm25_rounds_to_two_decimals() {
        let predictor = predictor_with(12.3456, 0);
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        assert_eq!(predictor.predict_pm25(&features).unwrap(), 12.35);

        let predictor = predictor_with(3.14159, 0);
        assert_eq!(predictor.predict_pm25(&features).unwrap(), 3.14);
    }

    #[test]
    fn test_known_code_gets_its_label() {
        let predictor = predictor_with(0.0, 2);
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        assert_eq!(
            predictor.predict_air_quality(&features).unwrap(),
            (2, "Unhealthy")
        );
    }

    #[test]
    fn test_unknown_code_degrades_to_unknown_label() {
        let predictor = predictor_with(0.0, 5);
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        let (quality_index, quality_label) = predictor.predict_air_quality(&features).unwrap();
        assert_eq!(quality_index, 5);
        assert_eq!(quality_label, UNKNOWN_LABEL);
    }

    #[test]
    fn test_predict_both_matches_individual_predictions() {
        let predictor = predictor_with(42.125, 1);
        let reading = EnvironmentalReading::default();
        let features = predictor.prepare_features(&reading);

        let result = predictor.predict_both(&reading).unwrap();

        assert_eq!(result.pm25_level, predictor.predict_pm25(&features).unwrap());
        let (quality_index, quality_label) = predictor.predict_air_quality(&features).unwrap();
        assert_eq!(result.quality_index, quality_index);
        assert_eq!(result.quality_label, quality_label);
    }

    #[test]
    fn test_predict_both_echoes_inputs() {
        let predictor = predictor_with(7.5, 0);
        let reading = EnvironmentalReading {
            temperature: 31.0,
            pm10: 140.0,
            ..EnvironmentalReading::default()
        };

        let result = predictor.predict_both(&reading).unwrap();

        assert_eq!(result.inputs, reading);
        assert!(result.generated_at > 0);
    }

    #[test]
    fn test_regression_failure_is_wrapped() {
        let predictor = AirPollutionPredictor::with_models(
            Box::new(FailingRegression),
            Box::new(FixedClassification(0)),
        );
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        let err = predictor.predict_pm25(&features).unwrap_err();
        match err {
            PredictorError::Prediction { kind, source } => {
                assert_eq!(kind, ModelKind::Regression);
                assert!(source.to_string().contains("exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classification_failure_fails_predict_both() {
        let predictor = AirPollutionPredictor::with_models(
            Box::new(FixedRegression(10.0)),
            Box::new(FailingClassification),
        );

        let err = predictor.predict_both(&EnvironmentalReading::default()).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::Prediction {
                kind: ModelKind::Classification,
                ..
            }
        ));
    }

    #[test]
    fn test_not_ready_without_a_model() {
        let predictor = AirPollutionPredictor {
            regression: None,
            classification: Some(Box::new(FixedClassification(0))),
        };
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        assert!(!predictor.is_ready());
        let err = predictor.predict_pm25(&features).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::ModelNotReady {
                kind: ModelKind::Regression
            }
        ));
    }

    #[test]
    fn test_quality_description_is_total() {
        assert_eq!(
            AirPollutionPredictor::quality_description("Good"),
            "Air quality is satisfactory, and air pollution poses little or no risk."
        );
        assert_eq!(
            AirPollutionPredictor::quality_description("Unknown"),
            NO_DESCRIPTION
        );
        assert_eq!(
            AirPollutionPredictor::quality_description("anything else"),
            NO_DESCRIPTION
        );
    }

    #[test]
    fn test_predictor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AirPollutionPredictor>();
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(62.25), 62.25);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(25.005), 25.01);
        assert_eq!(round2(-1.239), -1.24);
    }

    #[test]
    fn test_round2_passes_integral_magnitudes_through() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert_eq!(round2(INTEGRAL_THRESHOLD), INTEGRAL_THRESHOLD);
    }

    #[test]
    fn test_huge_estimate_stays_finite() {
        let predictor = predictor_with(1e307, 0);
        let features = predictor.prepare_features(&EnvironmentalReading::default());

        let pm25 = predictor.predict_pm25(&features).unwrap();
        assert!(pm25.is_finite());
        assert_eq!(pm25, 1e307);
    }

    #[test]
    fn test_debug_reports_model_readiness() {
        let rendered = format!("{:?}", predictor_with(62.25, 1));
        assert!(rendered.contains("regression_loaded: true"));
        assert!(rendered.contains("classification_loaded: true"));

        let half_built = AirPollutionPredictor {
            regression: None,
            classification: Some(Box::new(FixedClassification(0))),
        };
        let rendered = format!("{half_built:?}");
        assert!(rendered.contains("regression_loaded: false"));
        assert!(rendered.contains("classification_loaded: true"));
    }
}
