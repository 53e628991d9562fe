//! Report generation
//!
//! This module provides the public API for stride metrics. Two entry points with
//! deliberately different failure contracts:
//! - [`report_steps`] logs any failure and returns an empty string
//! - [`report_training`] logs any failure and returns it to the caller

use std::fmt;

use crate::duration::hours;
use crate::error::{ComputeError, Result};
use crate::metrics::{
    derive_metrics, distance_with_stride, walking_spent_calories, CalorieModel, STEP_LENGTH,
};
use crate::parser::{parse_steps, parse_training};
use crate::types::{PhysicalProfile, StepsSummary, TrainingSummary};

/// Build the steps-only report for a `<steps>,<duration>` record.
///
/// Returns an empty string on any failure; the error is logged.
///
/// # Example
/// ```
/// let report = stride_metrics::report_steps("10000,2h", 75.0, 1.75);
/// assert!(report.starts_with("Steps count: 10000."));
/// assert_eq!(stride_metrics::report_steps("garbage", 75.0, 1.75), "");
/// ```
pub fn report_steps(data: &str, weight: f64, height: f64) -> String {
    match steps_summary(data, weight, height) {
        Ok(summary) => {
            log::debug!("steps report for {:?}: {:?}", data, summary);
            summary.to_string()
        }
        Err(e) => {
            log::error!("{}", e);
            String::new()
        }
    }
}

/// Build the training report for a `<steps>,<label>,<duration>` record.
///
/// # Example
/// ```
/// let report = stride_metrics::report_training("5000,Running,1h0m", 75.0, 175.0).unwrap();
/// assert!(report.contains("Distance: 393.75 km."));
/// ```
pub fn report_training(data: &str, weight: f64, height: f64) -> Result<String> {
    match training_summary(data, weight, height) {
        Ok(summary) => {
            log::debug!("training report for {:?}: {:?}", data, summary);
            Ok(summary.to_string())
        }
        Err(e) => {
            log::error!("{}", e);
            Err(e)
        }
    }
}

/// Parse a steps-only record and compute its summary.
///
/// Distance uses the fixed [`STEP_LENGTH`] stride; calories use the walking
/// model with the height-derived speed.
pub fn steps_summary(data: &str, weight: f64, height: f64) -> Result<StepsSummary> {
    let record = parse_steps(data)?;
    let calories_burned = walking_spent_calories(record.steps, weight, height, &record.duration)?;

    Ok(StepsSummary {
        steps: record.steps,
        distance_km: distance_with_stride(record.steps, STEP_LENGTH),
        calories_burned,
    })
}

/// Parse a training record, validate it and compute its summary.
pub fn training_summary(data: &str, weight: f64, height: f64) -> Result<TrainingSummary> {
    let record = parse_training(data)?;

    if record.steps <= 0 {
        return Err(ComputeError::Steps(record.steps));
    }
    if record.duration <= chrono::Duration::zero() {
        return Err(ComputeError::Time(record.duration.to_string()));
    }
    PhysicalProfile::new(weight, height)?;

    let training_type = record.training_type();
    let model = CalorieModel::for_training(&training_type)?;
    let metrics = derive_metrics(model, record.steps, weight, height, &record.duration)?;

    Ok(TrainingSummary {
        training_type,
        steps: record.steps,
        duration_hours: hours(&record.duration),
        metrics,
    })
}

impl fmt::Display for StepsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps count: {}.", self.steps)?;
        writeln!(f, "Distance was {:.2} km.", self.distance_km)?;
        writeln!(f, "You burned {:.2} kcal.", self.calories_burned)
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training type: {}", self.training_type)?;
        writeln!(f, "Duration: {:.2} h.", self.duration_hours)?;
        writeln!(f, "Distance: {:.2} km.", self.metrics.distance_km)?;
        writeln!(f, "Speed: {:.2} km/h", self.metrics.average_speed_kmh)?;
        writeln!(f, "Calories burned: {:.2}", self.metrics.calories_burned)
    }
}
