//! Interval padding and merging.
//!
//! Turns a subject's raw event intervals into the minimal sorted,
//! non-overlapping set that covers every padded input. Padding exists
//! precisely to make near-adjacent events merge into one clip.

use serde::{Deserialize, Serialize};

/// A span of seconds within the source media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Start offset in seconds, never negative.
    pub start: f64,
    /// End offset in seconds, strictly greater than `start`.
    pub end: f64,
}

impl TimeInterval {
    /// Length of the interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Merge raw `(start, end)` pairs after padding each side.
///
/// Each pair is padded to `(max(0, start - padding), end + padding)`, the
/// padded intervals are sorted by start, and a single sweep merges every
/// overlapping or exactly touching pair. The result is sorted ascending and
/// strictly non-overlapping; no rounding is performed, boundary snapping is
/// the media engine's concern.
///
/// Runs in O(n log n) for the sort plus O(n) for the sweep.
pub fn merge_intervals(raw: &[(f64, f64)], padding: f64) -> Vec<TimeInterval> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut padded: Vec<TimeInterval> = raw
        .iter()
        .map(|&(start, end)| TimeInterval {
            start: (start - padding).max(0.0),
            end: end + padding,
        })
        .collect();

    // Ties are broken arbitrarily; merging makes the order irrelevant.
    padded.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged = Vec::with_capacity(padded.len());
    let mut iter = padded.into_iter();
    let mut current = match iter.next() {
        Some(first) => first,
        None => return Vec::new(),
    };

    for next in iter {
        if next.start <= current.end {
            // Overlapping or exactly touching.
            current.end = current.end.max(next.end);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}
