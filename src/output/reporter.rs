//! Human and JSON result reporting for command handlers.

use crate::error::Error;
use crate::output::json_envelope::{
    ErrorPayload, ErrorSeverity, EventType, JsonEnvelope, ResultType, RunPayload, SubjectErrorInfo,
    SubjectRecord, SubjectRecordStatus,
};
use crate::pipeline::{RunRequest, SubjectOutcome, SubjectStatus};

/// Emit a JSON result event to stdout.
///
/// Used by command handlers to output structured results when running in
/// JSON output mode.
pub fn emit_json_result<T: serde::Serialize>(payload: &T) {
    let envelope = JsonEnvelope::new(EventType::Result, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            // Log to stderr so it doesn't corrupt JSON output stream
            eprintln!("error: failed to serialize JSON result: {e}");
        }
    }
}

/// Emit a fatal error event to stdout in JSON output mode.
pub fn emit_json_error(error: &Error) {
    let payload = ErrorPayload {
        code: error.code().to_string(),
        severity: ErrorSeverity::Fatal,
        message: error.to_string(),
        suggestion: None,
    };
    let envelope = JsonEnvelope::new(EventType::Error, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize JSON error: {e}");
        }
    }
}

/// Build the result payload for a completed run.
pub fn run_payload(request: &RunRequest, outcomes: &[SubjectOutcome]) -> RunPayload {
    let subjects: Vec<SubjectRecord> = outcomes.iter().map(subject_record).collect();
    let subjects_completed = subjects
        .iter()
        .filter(|s| s.status == SubjectRecordStatus::Completed)
        .count();
    let subjects_failed = subjects
        .iter()
        .filter(|s| s.status == SubjectRecordStatus::Failed)
        .count();

    RunPayload {
        result_type: ResultType::Compilation,
        group_id: request.group_id.clone(),
        source_media: request.source_media.clone(),
        output_dir: request.output_dir.clone(),
        dry_run: request.dry_run,
        subjects_completed,
        subjects_failed,
        subjects,
    }
}

fn subject_record(outcome: &SubjectOutcome) -> SubjectRecord {
    match &outcome.status {
        SubjectStatus::Completed { output } => SubjectRecord {
            subject: outcome.subject_id.clone(),
            status: SubjectRecordStatus::Completed,
            output: Some(output.clone()),
            intervals: None,
            total_duration: None,
            error: None,
        },
        SubjectStatus::Planned {
            intervals,
            total_duration,
        } => SubjectRecord {
            subject: outcome.subject_id.clone(),
            status: SubjectRecordStatus::Planned,
            output: None,
            intervals: Some(intervals.clone()),
            total_duration: Some(*total_duration),
            error: None,
        },
        SubjectStatus::Failed { error } => SubjectRecord {
            subject: outcome.subject_id.clone(),
            status: SubjectRecordStatus::Failed,
            output: None,
            intervals: None,
            total_duration: None,
            error: Some(SubjectErrorInfo {
                code: error.code().to_string(),
                message: error.to_string(),
            }),
        },
    }
}

/// Print per-subject outcomes in human mode.
///
/// Completed subjects print their output path to stdout, one per line, so
/// the paths can be piped onward. Dry-run plans print the interval listing.
/// Failures go to stderr.
pub fn print_outcomes(outcomes: &[SubjectOutcome]) {
    for outcome in outcomes {
        match &outcome.status {
            SubjectStatus::Completed { output } => {
                println!("{}", output.display());
            }
            SubjectStatus::Planned {
                intervals,
                total_duration,
            } => {
                println!(
                    "Subject: {} | Clips: {} | Total Duration: {total_duration:.2}s",
                    outcome.subject_id,
                    intervals.len()
                );
                for (index, interval) in intervals.iter().enumerate() {
                    println!(
                        "  Clip {}: {:.2}s - {:.2}s (Duration: {:.2}s)",
                        index + 1,
                        interval.start,
                        interval.end,
                        interval.duration()
                    );
                }
            }
            SubjectStatus::Failed { error } => {
                eprintln!("{}: {error}", outcome.subject_id);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::EventSource;
    use crate::plan::TimeInterval;
    use std::path::PathBuf;

    fn request() -> RunRequest {
        RunRequest::new(
            PathBuf::from("game1.mp4"),
            EventSource::Local(PathBuf::from("events.csv")),
            "game1".to_string(),
        )
    }

    #[test]
    fn test_run_payload_counts_statuses() {
        let outcomes = vec![
            SubjectOutcome {
                subject_id: "PlayerA".to_string(),
                status: SubjectStatus::Completed {
                    output: PathBuf::from("game1_PlayerA.mp4"),
                },
            },
            SubjectOutcome {
                subject_id: "PlayerB".to_string(),
                status: SubjectStatus::Failed {
                    error: Error::IncompatibleStreams {
                        detail: "resolution mismatch".to_string(),
                    },
                },
            },
        ];

        let payload = run_payload(&request(), &outcomes);
        assert_eq!(payload.subjects_completed, 1);
        assert_eq!(payload.subjects_failed, 1);
        assert_eq!(payload.subjects.len(), 2);

        let failed = &payload.subjects[1];
        assert_eq!(failed.status, SubjectRecordStatus::Failed);
        let error = failed.error.as_ref().unwrap();
        assert_eq!(error.code, "incompatible_streams");
        assert!(error.message.contains("resolution mismatch"));
    }

    #[test]
    fn test_run_payload_carries_dry_run_plan() {
        let outcomes = vec![SubjectOutcome {
            subject_id: "PlayerA".to_string(),
            status: SubjectStatus::Planned {
                intervals: vec![TimeInterval {
                    start: 8.0,
                    end: 27.0,
                }],
                total_duration: 19.0,
            },
        }];

        let mut req = request();
        req.dry_run = true;
        let payload = run_payload(&req, &outcomes);

        assert!(payload.dry_run);
        assert_eq!(payload.subjects_completed, 0);
        let planned = &payload.subjects[0];
        assert_eq!(planned.status, SubjectRecordStatus::Planned);
        assert_eq!(planned.intervals.as_ref().unwrap().len(), 1);
        assert_eq!(planned.total_duration, Some(19.0));
    }
}
