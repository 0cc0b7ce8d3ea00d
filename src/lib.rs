//! Prediction façade over two pre-trained air pollution models
//!
//! This crate provides the core functionality for:
//! - Loading PM2.5 regression and air quality classification artifacts
//! - Feature vector assembly from named environmental readings
//! - Dual-model prediction with typed errors
//! - Quality labels, health descriptions and display colors
//!
//! The crate is presentation glue, not an ML library: models are opaque
//! objects loaded once at construction, and the "prediction" step is a
//! single call into them. A presentation layer collects the eight
//! readings, calls [`AirPollutionPredictor`], and renders the result.

pub mod config;
pub mod error;
pub mod models;
pub mod predictor;
pub mod quality;

pub use config::PredictorConfig;
pub use error::{ArtifactError, PredictorError, Result};
pub use models::*;
pub use predictor::{AirPollutionPredictor, Model, ModelError, ModelKind};
pub use quality::{QualityCategory, NO_DESCRIPTION, UNKNOWN_LABEL};
