//! Air quality categories and their presentation metadata
//!
//! The classification model emits an integer code; everything a
//! presentation layer shows for that code (label, health guidance,
//! display color) is looked up here. Lookups are lenient: codes and
//! labels outside the known set degrade to fixed fallbacks rather
//! than errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label reported for classifier codes outside the known range
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Fallback description for unrecognized quality labels
pub const NO_DESCRIPTION: &str = "No description available.";

/// Air quality category assigned by the classification model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityCategory {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl QualityCategory {
    /// All categories in code order
    pub const ALL: [QualityCategory; 4] = [
        QualityCategory::Good,
        QualityCategory::Moderate,
        QualityCategory::Unhealthy,
        QualityCategory::Hazardous,
    ];

    /// Category for a classifier output code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(QualityCategory::Good),
            1 => Some(QualityCategory::Moderate),
            2 => Some(QualityCategory::Unhealthy),
            3 => Some(QualityCategory::Hazardous),
            _ => None,
        }
    }

    /// Category for a label string
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Good" => Some(QualityCategory::Good),
            "Moderate" => Some(QualityCategory::Moderate),
            "Unhealthy" => Some(QualityCategory::Unhealthy),
            "Hazardous" => Some(QualityCategory::Hazardous),
            _ => None,
        }
    }

    /// Integer code assigned to this category during model training
    pub fn code(&self) -> i64 {
        match self {
            QualityCategory::Good => 0,
            QualityCategory::Moderate => 1,
            QualityCategory::Unhealthy => 2,
            QualityCategory::Hazardous => 3,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            QualityCategory::Good => "Good",
            QualityCategory::Moderate => "Moderate",
            QualityCategory::Unhealthy => "Unhealthy",
            QualityCategory::Hazardous => "Hazardous",
        }
    }

    /// Health guidance sentence for this category
    pub fn description(&self) -> &'static str {
        match self {
            QualityCategory::Good => {
                "Air quality is satisfactory, and air pollution poses little or no risk."
            }
            QualityCategory::Moderate => {
                "Air quality is acceptable. However, sensitive individuals may experience minor issues."
            }
            QualityCategory::Unhealthy => {
                "Members of sensitive groups may experience health effects. The general public is less likely to be affected."
            }
            QualityCategory::Hazardous => {
                "Health alert: The risk of health effects is increased for everyone."
            }
        }
    }

    /// Display color for this category (AQI palette, hex RGB)
    pub fn color(&self) -> &'static str {
        match self {
            QualityCategory::Good => "#00e400",
            QualityCategory::Moderate => "#ffff00",
            QualityCategory::Unhealthy => "#ff0000",
            QualityCategory::Hazardous => "#7e0023",
        }
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a classifier code, [`UNKNOWN_LABEL`] outside the known range
pub fn label_for_code(code: i64) -> &'static str {
    QualityCategory::from_code(code).map_or(UNKNOWN_LABEL, |category| category.label())
}

/// Description for a quality label; total, falling back to [`NO_DESCRIPTION`]
pub fn description_for_label(label: &str) -> &'static str {
    QualityCategory::from_label(label).map_or(NO_DESCRIPTION, |category| category.description())
}
