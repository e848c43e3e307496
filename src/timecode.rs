//! Timestamp parsing.
//!
//! Event tables carry human-entered timestamps such as `1:23:45` or `05:30`.
//! This module converts them into numeric offsets in seconds.

use crate::error::{Error, Result};

/// Parse a timestamp in `HH:MM:SS` or `MM:SS` form into seconds.
///
/// Hours and minutes must be non-negative integers; the seconds field may
/// carry a fractional part. No upper bound is enforced, so durations beyond
/// 24 hours are valid.
///
/// # Errors
///
/// Returns [`Error::TimestampFormat`] for any other field count or a field
/// that does not parse.
pub fn parse_timestamp(text: &str) -> Result<f64> {
    let fail = || Error::TimestampFormat {
        text: text.to_string(),
    };

    let parts: Vec<&str> = text.trim().split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (parse_field(h).ok_or_else(fail)?, m, s),
        [m, s] => (0, m, s),
        _ => return Err(fail()),
    };

    let minutes = parse_field(minutes).ok_or_else(fail)?;
    let seconds = parse_seconds(seconds).ok_or_else(fail)?;

    Ok(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

/// Parse an hours or minutes field as a non-negative integer.
fn parse_field(field: &str) -> Option<u32> {
    field.trim().parse().ok()
}

/// Parse the seconds field, allowing a fractional part.
fn parse_seconds(field: &str) -> Option<f64> {
    let value: f64 = field.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
