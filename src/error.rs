//! Error types for stride metrics

use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for record parsing and metric computation
pub type Result<T> = std::result::Result<T, ComputeError>;

/// Errors that can occur while parsing an activity record or computing metrics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    #[error("invalid record format: expected {expected} comma-separated fields, found {found}")]
    StringFormat { expected: usize, found: usize },

    #[error("failed to parse step count: {0}")]
    InvalidStepCount(#[from] ParseIntError),

    #[error("failed to parse duration: {0}")]
    InvalidDuration(String),

    #[error("invalid step count: {0}")]
    Steps(i64),

    #[error("invalid duration: {0}")]
    Time(String),

    #[error("invalid weight: {0}")]
    Weight(f64),

    #[error("invalid height: {0}")]
    Height(f64),

    #[error("unknown training type: {0:?}")]
    UnknownTrainingType(String),
}

impl ComputeError {
    /// Stable machine-readable code for this error
    pub fn kind(&self) -> &'static str {
        match self {
            ComputeError::StringFormat { .. } => "STRING_FORMAT",
            ComputeError::InvalidStepCount(_) => "PARSE_STEPS",
            ComputeError::InvalidDuration(_) => "PARSE_DURATION",
            ComputeError::Steps(_) => "STEPS",
            ComputeError::Time(_) => "TIME",
            ComputeError::Weight(_) => "WEIGHT",
            ComputeError::Height(_) => "HEIGHT",
            ComputeError::UnknownTrainingType(_) => "UNKNOWN_TRAINING_TYPE",
        }
    }

    /// True for errors raised while splitting or decoding the raw record
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ComputeError::StringFormat { .. }
                | ComputeError::InvalidStepCount(_)
                | ComputeError::InvalidDuration(_)
        )
    }
}
