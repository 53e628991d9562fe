//! Compact time-span notation
//!
//! Durations in activity records are written as a sequence of decimal numbers
//! each followed by a unit suffix, e.g. `2h30m`, `1.5h`, `45m`, `90s`.
//! An optional leading sign is accepted, and the bare string `0` is zero.
//!
//! Supported units: `ns`, `us` (`µs`), `ms`, `s`, `m`, `h`.

use chrono::Duration;

use crate::error::{ComputeError, Result};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this are ignored (below nanosecond precision anyway)
const MAX_FRACTION_DIGITS: u32 = 18;

/// Parse a compact duration string such as `2h30m` into a [`Duration`].
///
/// Zero and negative spans are valid results; positivity is the caller's concern.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = || ComputeError::InvalidDuration(format!("invalid duration {:?}", input));

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    // Magnitude limit: i64::MAX nanoseconds, one more when negative
    let limit = i64::MAX as u128 + u128::from(negative);
    let mut total: u128 = 0;

    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, whole_len) = leading_integer(rest).ok_or_else(invalid)?;
        rest = &rest[whole_len..];

        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut fraction_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits = after_dot
                .bytes()
                .take_while(|b| b.is_ascii_digit())
                .count();
            for (i, b) in after_dot.bytes().take(digits).enumerate() {
                if (i as u32) < MAX_FRACTION_DIGITS {
                    fraction = fraction * 10 + u128::from(b - b'0');
                    scale *= 10;
                }
            }
            fraction_len = digits;
            rest = &after_dot[digits..];
        }

        if whole_len == 0 && fraction_len == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        if unit.is_empty() {
            return Err(ComputeError::InvalidDuration(format!(
                "missing unit in duration {:?}",
                input
            )));
        }
        let unit_nanos = unit_nanos(unit).ok_or_else(|| {
            ComputeError::InvalidDuration(format!(
                "unknown unit {:?} in duration {:?}",
                unit, input
            ))
        })?;

        let component = whole
            .checked_mul(unit_nanos)
            .and_then(|v| v.checked_add(fraction * unit_nanos / scale))
            .ok_or_else(invalid)?;
        total = total.checked_add(component).ok_or_else(invalid)?;
        if total > limit {
            return Err(invalid());
        }
    }

    let nanos = if negative {
        // total <= i64::MAX + 1, so the wrapping negation lands exactly on i64::MIN at the edge
        (total as i64).wrapping_neg()
    } else {
        total as i64
    };
    Ok(Duration::nanoseconds(nanos))
}

/// Parse the run of ASCII digits at the start of `s`, returning value and length
fn leading_integer(s: &str) -> Option<(u128, usize)> {
    let mut value: u128 = 0;
    let mut len = 0;
    for b in s.bytes().take_while(|b| b.is_ascii_digit()) {
        value = value.checked_mul(10)?.checked_add(u128::from(b - b'0'))?;
        if value > i64::MAX as u128 + 1 {
            return None;
        }
        len += 1;
    }
    Some((value, len))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Duration as fractional hours
pub fn hours(duration: &Duration) -> f64 {
    fractional(duration, NANOS_PER_HOUR as i64)
}

/// Duration as fractional minutes
pub fn minutes(duration: &Duration) -> f64 {
    fractional(duration, NANOS_PER_MINUTE as i64)
}

fn fractional(duration: &Duration, unit_nanos: i64) -> f64 {
    match duration.num_nanoseconds() {
        Some(ns) => {
            let whole = ns / unit_nanos;
            let rem = ns % unit_nanos;
            whole as f64 + rem as f64 / unit_nanos as f64
        }
        None => duration.num_milliseconds() as f64 / (unit_nanos / 1_000_000) as f64,
    }
}
