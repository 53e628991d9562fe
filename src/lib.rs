//! Stride Metrics - Activity record parsing and fitness metrics
//!
//! Turns short comma-delimited activity records into distance, average speed and
//! calories burned: record parsing → validation → metric derivation → report text.
//!
//! ## Entry points
//!
//! - [`report_steps`]: `"<steps>,<duration>"` records, always treated as walking.
//!   Failures are logged and yield an empty string.
//! - [`report_training`]: `"<steps>,<Running|Walking>,<duration>"` records.
//!   Failures are logged and returned.

pub mod config;
pub mod duration;
pub mod error;
pub mod metrics;
pub mod parser;
pub mod report;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::{ConfigError, ProfileConfig};
pub use error::{ComputeError, Result};
pub use metrics::{running_spent_calories, walking_spent_calories, CalorieModel};
pub use parser::{parse_steps, parse_training};
pub use report::{report_steps, report_training, steps_summary, training_summary};
pub use types::{
    ActivityRecord, DerivedMetrics, PhysicalProfile, StepsRecord, StepsSummary, TrainingSummary,
    TrainingType,
};

/// Library version
pub const STRIDE_VERSION: &str = env!("CARGO_PKG_VERSION");
