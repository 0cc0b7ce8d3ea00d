//! Error types for model loading and prediction

use crate::predictor::{ModelError, ModelKind, ARTIFACT_SCHEMA_VERSION};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the prediction façade
#[derive(Debug, Error)]
pub enum PredictorError {
    /// No artifact file exists at the given path
    #[error("{kind} model not found at {}", .path.display())]
    ModelNotFound { kind: ModelKind, path: PathBuf },

    /// The artifact exists but could not be read, parsed or validated
    #[error("failed to load {kind} model from {}", .path.display())]
    ModelLoad {
        kind: ModelKind,
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },

    /// A prediction was requested before the model was loaded
    #[error("{kind} model is not loaded")]
    ModelNotReady { kind: ModelKind },

    /// The model itself failed while predicting
    #[error("{kind} prediction failed")]
    Prediction {
        kind: ModelKind,
        #[source]
        source: ModelError,
    },
}

/// Failures while reading or validating a model artifact file
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported artifact schema version {found}, expected {}", ARTIFACT_SCHEMA_VERSION)]
    UnsupportedSchema { found: u32 },

    #[error("artifact holds a {found} model, expected {expected}")]
    KindMismatch { expected: ModelKind, found: ModelKind },

    #[error("expected {expected} feature weights, found {found}")]
    FeatureCountMismatch { expected: usize, found: usize },

    #[error("feature {index} is {found:?}, expected {expected:?}")]
    FeatureOrderMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("classification artifact lists no classes")]
    NoClasses,
}

/// Convenience alias for façade results
pub type Result<T> = std::result::Result<T, PredictorError>;
