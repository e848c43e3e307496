//! Clip plan construction.
//!
//! Groups filtered events by subject, parses their timestamps, and runs the
//! interval merger per subject. A malformed row rejects the whole build; a
//! subtly wrong interval is worse than a missing run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::events::RawEvent;
use crate::timecode::parse_timestamp;

use super::interval::{TimeInterval, merge_intervals};

/// Per-subject output of merging.
#[derive(Debug, Clone)]
pub struct MergedPlan {
    /// Subject these intervals belong to.
    pub subject_id: String,
    /// Sorted, strictly non-overlapping intervals.
    pub intervals: Vec<TimeInterval>,
}

impl MergedPlan {
    /// Total covered duration in seconds.
    pub fn total_duration(&self) -> f64 {
        self.intervals.iter().map(TimeInterval::duration).sum()
    }
}

/// Full unit of work for one subject.
#[derive(Debug, Clone)]
pub struct ClipPlan {
    /// Source recording the intervals refer to.
    pub source_media: PathBuf,
    /// The subject's merged intervals.
    pub merged: MergedPlan,
}

impl ClipPlan {
    /// Subject this plan compiles.
    pub fn subject_id(&self) -> &str {
        &self.merged.subject_id
    }
}

/// Build one plan per subject from filtered events.
///
/// Plans are emitted in sorted subject order so runs are deterministic.
/// Zero events yield zero plans, which is not an error.
///
/// # Errors
///
/// Fails wholesale with row context if any event's timestamps cannot be
/// parsed or its stop time is not after its start time.
pub fn build_plans(
    events: &[RawEvent],
    source_media: &Path,
    padding: f64,
) -> Result<Vec<ClipPlan>> {
    let mut by_subject: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();

    for event in events {
        let start = parse_timestamp(&event.start_raw).map_err(|e| row_error(event, &e))?;
        let stop = parse_timestamp(&event.stop_raw).map_err(|e| row_error(event, &e))?;

        if stop <= start {
            return Err(Error::EventRow {
                line: event.line,
                message: format!(
                    "stop time '{}' is not after start time '{}'",
                    event.stop_raw, event.start_raw
                ),
            });
        }

        by_subject
            .entry(event.subject_id.clone())
            .or_default()
            .push((start, stop));
    }

    let plans = by_subject
        .into_iter()
        .map(|(subject_id, pairs)| ClipPlan {
            source_media: source_media.to_path_buf(),
            merged: MergedPlan {
                subject_id,
                intervals: merge_intervals(&pairs, padding),
            },
        })
        .collect();

    Ok(plans)
}

fn row_error(event: &RawEvent, cause: &Error) -> Error {
    Error::EventRow {
        line: event.line,
        message: cause.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn event(subject: &str, start: &str, stop: &str, line: u64) -> RawEvent {
        RawEvent {
            group_id: "game1".to_string(),
            start_raw: start.to_string(),
            stop_raw: stop.to_string(),
            subject_id: subject.to_string(),
            included: true,
            line,
        }
    }

    #[test]
    fn test_groups_by_subject_in_sorted_order() {
        let events = vec![
            event("PlayerB", "00:01:00", "00:01:10", 2),
            event("PlayerA", "00:02:00", "00:02:10", 3),
            event("PlayerA", "00:04:00", "00:04:10", 4),
        ];

        let plans = build_plans(&events, Path::new("game1.mp4"), 0.0).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].subject_id(), "PlayerA");
        assert_eq!(plans[1].subject_id(), "PlayerB");
        assert_eq!(plans[0].merged.intervals.len(), 2);
        assert_eq!(plans[0].merged.intervals[0].start, 120.0);
        assert_eq!(plans[0].source_media, PathBuf::from("game1.mp4"));
    }

    #[test]
    fn test_merging_applied_per_subject() {
        let events = vec![
            event("PlayerA", "00:10", "00:20", 2),
            event("PlayerA", "00:15", "00:25", 3),
            event("PlayerA", "00:30", "00:40", 4),
        ];

        let plans = build_plans(&events, Path::new("game1.mp4"), 2.0).unwrap();
        let intervals = &plans[0].merged.intervals;
        assert_eq!(intervals.len(), 2);
        assert_eq!((intervals[0].start, intervals[0].end), (8.0, 27.0));
        assert_eq!((intervals[1].start, intervals[1].end), (28.0, 42.0));
        assert_eq!(plans[0].merged.total_duration(), 33.0);
    }

    #[test]
    fn test_bad_timestamp_rejects_whole_build() {
        let events = vec![
            event("PlayerA", "00:01:00", "00:01:10", 2),
            event("PlayerB", "1:2:3:4", "00:02:10", 3),
        ];

        let err = build_plans(&events, Path::new("game1.mp4"), 0.0).unwrap_err();
        match err {
            Error::EventRow { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("1:2:3:4"));
            }
            other => panic!("expected EventRow, got {other}"),
        }
    }

    #[test]
    fn test_stop_not_after_start_rejected() {
        let events = vec![event("PlayerA", "00:01:10", "00:01:10", 2)];
        let err = build_plans(&events, Path::new("game1.mp4"), 0.0).unwrap_err();
        assert!(matches!(err, Error::EventRow { line: 2, .. }));
    }

    #[test]
    fn test_no_events_no_plans() {
        let plans = build_plans(&[], Path::new("game1.mp4"), 0.0).unwrap();
        assert!(plans.is_empty());
    }
}
