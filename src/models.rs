//! Core data models for the prediction façade

use serde::{Deserialize, Serialize};

/// Number of input features both models were trained on
pub const FEATURE_COUNT: usize = 8;

/// Feature names in training order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "humidity",
    "pm10",
    "no2",
    "so2",
    "co",
    "industrial_proximity",
    "population_density",
];

/// One set of environmental readings supplied by the presentation layer
///
/// Pure value type; readings are taken as given and never range-checked
/// here. Advisory bounds for input widgets live in [`INPUT_RANGES`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    /// Ambient temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// PM10 concentration
    pub pm10: f64,
    /// NO2 concentration
    pub no2: f64,
    /// SO2 concentration
    pub so2: f64,
    /// CO concentration
    pub co: f64,
    /// Proximity to industrial areas on a 0-10 scale
    pub industrial_proximity: f64,
    /// Population density of the surrounding area
    pub population_density: f64,
}

impl Default for EnvironmentalReading {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 50.0,
            pm10: 20.0,
            no2: 15.0,
            so2: 10.0,
            co: 1.0,
            industrial_proximity: 5.0,
            population_density: 500.0,
        }
    }
}

/// Ordered feature vector for model inference
///
/// The order is fixed by [`FEATURE_NAMES`] and must match the order the
/// models were trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Feature values in training order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<&EnvironmentalReading> for FeatureVector {
    fn from(reading: &EnvironmentalReading) -> Self {
        Self([
            reading.temperature,
            reading.humidity,
            reading.pm10,
            reading.no2,
            reading.so2,
            reading.co,
            reading.industrial_proximity,
            reading.population_density,
        ])
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Combined output of both models for one set of readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Estimated PM2.5 concentration, rounded to two decimal places
    pub pm25_level: f64,
    /// Raw category code from the classification model
    pub quality_index: i64,
    /// Label for the category code, `"Unknown"` outside the known range
    pub quality_label: String,
    /// The readings the prediction was made from
    pub inputs: EnvironmentalReading,
    /// Unix timestamp of when the prediction was generated
    pub generated_at: i64,
}

/// Advisory bounds and default for one input field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// Advisory input bounds and defaults, in feature order
///
/// Presentation layers may use these to configure input widgets; the
/// façade itself never enforces them.
pub const INPUT_RANGES: [InputRange; FEATURE_COUNT] = [
    InputRange {
        name: "temperature",
        min: -10.0,
        max: 50.0,
        default: 25.0,
    },
    InputRange {
        name: "humidity",
        min: 0.0,
        max: 100.0,
        default: 50.0,
    },
    InputRange {
        name: "pm10",
        min: 0.0,
        max: 500.0,
        default: 20.0,
    },
    InputRange {
        name: "no2",
        min: 0.0,
        max: 500.0,
        default: 15.0,
    },
    InputRange {
        name: "so2",
        min: 0.0,
        max: 500.0,
        default: 10.0,
    },
    InputRange {
        name: "co",
        min: 0.0,
        max: 10.0,
        default: 1.0,
    },
    InputRange {
        name: "industrial_proximity",
        min: 0.0,
        max: 10.0,
        default: 5.0,
    },
    InputRange {
        name: "population_density",
        min: 0.0,
        max: 10000.0,
        default: 500.0,
    },
];
