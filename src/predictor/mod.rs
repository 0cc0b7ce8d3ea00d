//! Model loading and the prediction façade

mod artifact;
mod facade;

pub use artifact::{
    ClassWeights, ClassificationModel, ModelArtifact, ModelParams, RegressionModel,
    ARTIFACT_SCHEMA_VERSION,
};
pub use facade::AirPollutionPredictor;

use crate::models::FeatureVector;
use std::fmt;

/// Which of the two models an operation concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Regression,
    Classification,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Regression => f.write_str("regression"),
            ModelKind::Classification => f.write_str("classification"),
        }
    }
}

/// Opaque error raised inside a model implementation
pub type ModelError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A loaded predictive model
///
/// Implementations are read-only after construction, so a façade holding
/// them can be shared across threads without locking.
pub trait Model: Send + Sync {
    /// Scalar the model produces for one input row
    type Output;

    /// Run the model on a single feature vector
    fn predict(&self, features: &FeatureVector) -> Result<Self::Output, ModelError>;
}
