//! Activity record parsing
//!
//! Records are short comma-delimited strings:
//! - steps-only: `<steps>,<duration>`, e.g. `5000,1h30m`
//! - training: `<steps>,<label>,<duration>`, e.g. `5000,Running,1h30m`
//!
//! Fields are taken verbatim (no trimming). The training label is returned as-is;
//! checking it against the recognized set happens when the report is built.

use chrono::Duration;

use crate::duration::parse_duration;
use crate::error::{ComputeError, Result};
use crate::types::{ActivityRecord, StepsRecord};

/// Field delimiter within a record
pub const FIELD_DELIMITER: char = ',';

/// Parse a steps-only record
pub fn parse_steps(input: &str) -> Result<StepsRecord> {
    let fields = split_fields(input, 2)?;
    let steps = parse_step_count(fields[0])?;
    let duration = parse_positive_duration(fields[1])?;
    Ok(StepsRecord { steps, duration })
}

/// Parse a training record
pub fn parse_training(input: &str) -> Result<ActivityRecord> {
    let fields = split_fields(input, 3)?;
    let steps = parse_step_count(fields[0])?;
    let duration = parse_positive_duration(fields[2])?;
    Ok(ActivityRecord {
        steps,
        activity_label: fields[1].to_string(),
        duration,
    })
}

fn split_fields(input: &str, expected: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = input.split(FIELD_DELIMITER).collect();
    if fields.len() != expected {
        return Err(ComputeError::StringFormat {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_step_count(field: &str) -> Result<i64> {
    let steps: i64 = field.parse()?;
    if steps <= 0 {
        return Err(ComputeError::Steps(steps));
    }
    Ok(steps)
}

fn parse_positive_duration(field: &str) -> Result<Duration> {
    let duration = parse_duration(field)?;
    if duration <= Duration::zero() {
        return Err(ComputeError::Time(field.to_string()));
    }
    Ok(duration)
}
