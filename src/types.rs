//! Core types for stride metrics
//!
//! This module defines the data structures that flow from a raw activity record
//! through validation to the derived metrics and the final summaries.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ComputeError, Result};

/// Training type label as it appears in a training record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingType {
    Running,
    Walking,
    /// Any label outside the recognized set, kept verbatim
    Unknown(String),
}

impl TrainingType {
    /// Classify a raw label. Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Running" => TrainingType::Running,
            "Walking" => TrainingType::Walking,
            other => TrainingType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TrainingType::Running => "Running",
            TrainingType::Walking => "Walking",
            TrainingType::Unknown(label) => label,
        }
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed steps-only record: `<steps>,<duration>`
#[derive(Debug, Clone, PartialEq)]
pub struct StepsRecord {
    pub steps: i64,
    pub duration: Duration,
}

/// Parsed training record: `<steps>,<label>,<duration>`
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub steps: i64,
    /// Raw label, not yet checked against the recognized set
    pub activity_label: String,
    pub duration: Duration,
}

impl ActivityRecord {
    pub fn training_type(&self) -> TrainingType {
        TrainingType::from_label(&self.activity_label)
    }
}

/// Caller-supplied body measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProfile {
    /// Body weight (kg)
    pub weight: f64,
    /// Height, in the same unit the stride coefficient is applied to
    pub height: f64,
}

impl PhysicalProfile {
    /// Build a profile, rejecting non-positive or non-finite values
    pub fn new(weight: f64, height: f64) -> Result<Self> {
        let profile = Self { weight, height };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.weight) {
            return Err(ComputeError::Weight(self.weight));
        }
        if !is_positive(self.height) {
            return Err(ComputeError::Height(self.height));
        }
        Ok(())
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Physical quantities derived from a validated record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub distance_km: f64,
    pub average_speed_kmh: f64,
    pub calories_burned: f64,
}

/// Result of a steps-only computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsSummary {
    pub steps: i64,
    /// Distance at the fixed stride length (km)
    pub distance_km: f64,
    /// Calories under the walking model (kcal)
    pub calories_burned: f64,
}

/// Result of a training computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub training_type: TrainingType,
    pub steps: i64,
    pub duration_hours: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_type_from_label() {
        assert_eq!(TrainingType::from_label("Running"), TrainingType::Running);
        assert_eq!(TrainingType::from_label("Walking"), TrainingType::Walking);
        assert_eq!(
            TrainingType::from_label("running"),
            TrainingType::Unknown("running".to_string())
        );
        assert_eq!(TrainingType::from_label("Swimming").as_str(), "Swimming");
    }

    #[test]
    fn test_profile_validation() {
        assert!(PhysicalProfile::new(75.0, 1.75).is_ok());
        assert_eq!(
            PhysicalProfile::new(0.0, 1.75).unwrap_err(),
            ComputeError::Weight(0.0)
        );
        assert_eq!(
            PhysicalProfile::new(75.0, -1.0).unwrap_err(),
            ComputeError::Height(-1.0)
        );
        assert!(PhysicalProfile::new(f64::NAN, 1.75).is_err());
        assert!(PhysicalProfile::new(75.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_training_summary_serializes_flat() {
        let summary = TrainingSummary {
            training_type: TrainingType::Running,
            steps: 5000,
            duration_hours: 1.0,
            metrics: DerivedMetrics {
                distance_km: 3.9375,
                average_speed_kmh: 3.9375,
                calories_burned: 295.3125,
            },
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["training_type"], "Running");
        assert_eq!(json["distance_km"], 3.9375);
        assert_eq!(json["calories_burned"], 295.3125);
    }
}
