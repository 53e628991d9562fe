//! Metric derivation
//!
//! This module turns validated step counts and durations into physical quantities:
//! - Stride length (fixed, or derived from height)
//! - Distance and average speed
//! - Calories burned under the running and walking models

use chrono::Duration;

use crate::duration::{hours, minutes};
use crate::error::{ComputeError, Result};
use crate::types::{is_positive, DerivedMetrics, TrainingType};

/// Fixed stride length for steps-only records (meters)
pub const STEP_LENGTH: f64 = 0.65;

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;

/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

/// Height multiplier giving the stride length
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;

/// Walking burns this fraction of the running estimate
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

/// Calorie model applied to a training
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalorieModel {
    Running,
    Walking,
}

impl CalorieModel {
    /// Multiplier applied to the base calorie estimate
    pub fn coefficient(&self) -> f64 {
        match self {
            CalorieModel::Running => 1.0,
            CalorieModel::Walking => WALKING_CALORIES_COEFFICIENT,
        }
    }

    /// Model for a training type, or `UnknownTrainingType` for unrecognized labels
    pub fn for_training(training_type: &TrainingType) -> Result<Self> {
        match training_type {
            TrainingType::Running => Ok(CalorieModel::Running),
            TrainingType::Walking => Ok(CalorieModel::Walking),
            TrainingType::Unknown(label) => Err(ComputeError::UnknownTrainingType(label.clone())),
        }
    }
}

/// Stride length derived from height
pub fn stride_length(height: f64) -> f64 {
    height * STEP_LENGTH_COEFFICIENT
}

/// Distance (km) for a step count at the height-derived stride
pub fn distance(steps: i64, height: f64) -> f64 {
    distance_with_stride(steps, stride_length(height))
}

/// Distance (km) for a step count at a given stride (meters)
pub fn distance_with_stride(steps: i64, stride: f64) -> f64 {
    steps as f64 * stride / M_IN_KM
}

/// Average speed (km/h); zero when the duration is not positive
pub fn mean_speed(steps: i64, height: f64, duration: &Duration) -> f64 {
    if *duration <= Duration::zero() {
        return 0.0;
    }
    distance(steps, height) / hours(duration)
}

/// Calories burned under the given model.
///
/// Inputs are checked in order: steps, duration, weight, height.
pub fn spent_calories(
    model: CalorieModel,
    steps: i64,
    weight: f64,
    height: f64,
    duration: &Duration,
) -> Result<f64> {
    if steps <= 0 {
        return Err(ComputeError::Steps(steps));
    }
    if *duration <= Duration::zero() {
        return Err(ComputeError::Time(format!("{}", duration)));
    }
    if !is_positive(weight) {
        return Err(ComputeError::Weight(weight));
    }
    if !is_positive(height) {
        return Err(ComputeError::Height(height));
    }

    let average_speed = mean_speed(steps, height, duration);
    if average_speed <= 0.0 {
        log::warn!(
            "non-positive average speed {:.4} km/h for {} steps",
            average_speed,
            steps
        );
    }

    let base = weight * average_speed * minutes(duration) / MIN_IN_H;
    Ok(base * model.coefficient())
}

/// Calories burned running
pub fn running_spent_calories(
    steps: i64,
    weight: f64,
    height: f64,
    duration: &Duration,
) -> Result<f64> {
    spent_calories(CalorieModel::Running, steps, weight, height, duration)
}

/// Calories burned walking
pub fn walking_spent_calories(
    steps: i64,
    weight: f64,
    height: f64,
    duration: &Duration,
) -> Result<f64> {
    spent_calories(CalorieModel::Walking, steps, weight, height, duration)
}

/// Distance, speed and calories for a training under the given model
pub fn derive_metrics(
    model: CalorieModel,
    steps: i64,
    weight: f64,
    height: f64,
    duration: &Duration,
) -> Result<DerivedMetrics> {
    let calories_burned = spent_calories(model, steps, weight, height, duration)?;
    Ok(DerivedMetrics {
        distance_km: distance(steps, height),
        average_speed_kmh: mean_speed(steps, height, duration),
        calories_burned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance_from_height() {
        // 5000 * (175 * 0.45) / 1000
        assert!((distance(5000, 175.0) - 393.75).abs() < EPS);
        assert!((stride_length(1.75) - 0.7875).abs() < EPS);
    }

    #[test]
    fn test_distance_with_fixed_stride() {
        assert!((distance_with_stride(10_000, STEP_LENGTH) - 6.5).abs() < EPS);
    }

    #[test]
    fn test_mean_speed() {
        let speed = mean_speed(5000, 175.0, &Duration::minutes(30));
        assert!((speed - 787.5).abs() < EPS);
        assert_eq!(mean_speed(5000, 175.0, &Duration::zero()), 0.0);
        assert_eq!(mean_speed(5000, 175.0, &Duration::hours(-1)), 0.0);
    }

    #[test]
    fn test_running_calories_one_hour() {
        // 75 * 393.75 * 60 / 60
        let calories = running_spent_calories(5000, 75.0, 175.0, &Duration::hours(1)).unwrap();
        assert!((calories - 29531.25).abs() < 1e-6);
    }

    #[test]
    fn test_walking_is_half_of_running() {
        let duration = Duration::minutes(45);
        let running = running_spent_calories(6000, 82.5, 1.8, &duration).unwrap();
        let walking = walking_spent_calories(6000, 82.5, 1.8, &duration).unwrap();
        assert!((walking - running * 0.5).abs() < EPS);
    }

    #[test]
    fn test_calories_validation_order() {
        let d = Duration::hours(1);
        assert_eq!(
            spent_calories(CalorieModel::Running, 0, 0.0, 0.0, &d).unwrap_err(),
            ComputeError::Steps(0)
        );
        assert!(matches!(
            spent_calories(CalorieModel::Running, 10, 0.0, 0.0, &Duration::zero()).unwrap_err(),
            ComputeError::Time(_)
        ));
        assert_eq!(
            spent_calories(CalorieModel::Running, 10, 0.0, 0.0, &d).unwrap_err(),
            ComputeError::Weight(0.0)
        );
        assert_eq!(
            spent_calories(CalorieModel::Walking, 10, 70.0, -2.0, &d).unwrap_err(),
            ComputeError::Height(-2.0)
        );
    }

    #[test]
    fn test_model_for_training() {
        assert_eq!(
            CalorieModel::for_training(&TrainingType::Running).unwrap(),
            CalorieModel::Running
        );
        assert_eq!(
            CalorieModel::for_training(&TrainingType::Walking).unwrap(),
            CalorieModel::Walking
        );
        assert_eq!(
            CalorieModel::for_training(&TrainingType::Unknown("Swimming".to_string())).unwrap_err(),
            ComputeError::UnknownTrainingType("Swimming".to_string())
        );
    }

    #[test]
    fn test_derive_metrics() {
        let metrics =
            derive_metrics(CalorieModel::Walking, 5000, 75.0, 175.0, &Duration::hours(2)).unwrap();
        assert!((metrics.distance_km - 393.75).abs() < EPS);
        assert!((metrics.average_speed_kmh - 196.875).abs() < EPS);
        // 75 * 196.875 * 120 / 60 * 0.5
        assert!((metrics.calories_burned - 14765.625).abs() < 1e-6);
    }
}
