//! Model artifact files and the two model implementations
//!
//! Artifacts are JSON documents carrying a schema version, a `kind` tag
//! and the trained parameters. All validation happens at load time, so
//! `predict` never has to re-check dimensions.

use super::{Model, ModelError, ModelKind};
use crate::error::ArtifactError;
use crate::models::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Artifact schema version this crate reads and writes
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// On-disk model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,

    /// When the training pipeline produced this artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,

    /// Feature order the model was trained on, when recorded
    ///
    /// Validated against [`FEATURE_NAMES`] so an artifact trained with a
    /// different input order is rejected at load instead of silently
    /// producing garbage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    #[serde(flatten)]
    pub params: ModelParams,
}

/// Trained parameters, discriminated by the `kind` field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelParams {
    Regression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Classification {
        classes: Vec<ClassWeights>,
    },
}

impl ModelParams {
    fn kind(&self) -> ModelKind {
        match self {
            ModelParams::Regression { .. } => ModelKind::Regression,
            ModelParams::Classification { .. } => ModelKind::Classification,
        }
    }
}

/// Linear scoring parameters for one output class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassWeights {
    /// Integer code assigned to this class during training
    pub code: i64,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl ModelArtifact {
    /// Read and validate an artifact from disk
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let raw = fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Kind recorded in the artifact's `kind` field
    pub fn kind(&self) -> ModelKind {
        self.params.kind()
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.schema_version != ARTIFACT_SCHEMA_VERSION {
            return Err(ArtifactError::UnsupportedSchema {
                found: self.schema_version,
            });
        }

        if let Some(names) = &self.feature_names {
            if names.len() != FEATURE_COUNT {
                return Err(ArtifactError::FeatureCountMismatch {
                    expected: FEATURE_COUNT,
                    found: names.len(),
                });
            }
            for (index, (found, expected)) in names.iter().zip(FEATURE_NAMES).enumerate() {
                if found != expected {
                    return Err(ArtifactError::FeatureOrderMismatch {
                        index,
                        expected: expected.to_string(),
                        found: found.clone(),
                    });
                }
            }
        }

        match &self.params {
            ModelParams::Regression { coefficients, .. } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(ArtifactError::FeatureCountMismatch {
                        expected: FEATURE_COUNT,
                        found: coefficients.len(),
                    });
                }
            }
            ModelParams::Classification { classes } => {
                if classes.is_empty() {
                    return Err(ArtifactError::NoClasses);
                }
                for class in classes {
                    if class.weights.len() != FEATURE_COUNT {
                        return Err(ArtifactError::FeatureCountMismatch {
                            expected: FEATURE_COUNT,
                            found: class.weights.len(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Linear regression model estimating PM2.5 concentration
#[derive(Debug, Clone)]
pub struct RegressionModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl RegressionModel {
    /// Build from an artifact, rejecting artifacts of another kind
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        match artifact.params {
            ModelParams::Regression {
                coefficients,
                intercept,
            } => {
                let coefficients = fixed_weights(coefficients)?;
                Ok(Self {
                    coefficients,
                    intercept,
                })
            }
            other => Err(ArtifactError::KindMismatch {
                expected: ModelKind::Regression,
                found: other.kind(),
            }),
        }
    }

    /// Load and validate a regression artifact from disk
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        Self::from_artifact(ModelArtifact::from_path(path)?)
    }
}

impl Model for RegressionModel {
    type Output = f64;

    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let estimate = dot(&self.coefficients, features) + self.intercept;
        if !estimate.is_finite() {
            return Err(format!("regression estimate is not finite: {estimate}").into());
        }
        Ok(estimate)
    }
}

/// Linear classifier estimating the air quality category code
///
/// Each class is scored with its own weights and bias; the highest score
/// wins and ties go to the class listed first in the artifact.
#[derive(Debug, Clone)]
pub struct ClassificationModel {
    classes: Vec<ClassScorer>,
}

#[derive(Debug, Clone)]
struct ClassScorer {
    code: i64,
    weights: [f64; FEATURE_COUNT],
    bias: f64,
}

impl ClassificationModel {
    /// Build from an artifact, rejecting artifacts of another kind
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        match artifact.params {
            ModelParams::Classification { classes } => {
                if classes.is_empty() {
                    return Err(ArtifactError::NoClasses);
                }
                let classes = classes
                    .into_iter()
                    .map(|class| {
                        Ok(ClassScorer {
                            code: class.code,
                            weights: fixed_weights(class.weights)?,
                            bias: class.bias,
                        })
                    })
                    .collect::<Result<Vec<_>, ArtifactError>>()?;
                Ok(Self { classes })
            }
            other => Err(ArtifactError::KindMismatch {
                expected: ModelKind::Classification,
                found: other.kind(),
            }),
        }
    }

    /// Load and validate a classification artifact from disk
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        Self::from_artifact(ModelArtifact::from_path(path)?)
    }
}

impl Model for ClassificationModel {
    type Output = i64;

    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError> {
        let mut best: Option<(i64, f64)> = None;
        for class in &self.classes {
            let score = dot(&class.weights, features) + class.bias;
            if !score.is_finite() {
                return Err(format!("class {} score is not finite: {score}", class.code).into());
            }
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class.code, score)),
            }
        }
        // from_artifact rejects artifacts with no classes
        best.map(|(code, _)| code)
            .ok_or_else(|| ModelError::from("classifier has no classes"))
    }
}

fn dot(weights: &[f64; FEATURE_COUNT], features: &FeatureVector) -> f64 {
    weights
        .iter()
        .zip(features.as_slice())
        .map(|(weight, value)| weight * value)
        .sum()
}

fn fixed_weights(weights: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let found = weights.len();
    weights
        .try_into()
        .map_err(|_| ArtifactError::FeatureCountMismatch {
            expected: FEATURE_COUNT,
            found,
        })
}
