//! JSON envelope types for CLI output.
//!
//! Structured output for command-line operations, so reelcut can sit behind
//! a web frontend or wrapping script without screen-scraping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::plan::TimeInterval;

/// Current spec version for JSON envelope.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct JsonEnvelope<T> {
    /// API specification version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Final result.
    Result,
    /// Error occurred.
    Error,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Highlight compilation results.
    Compilation,
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// Fatal error, the run cannot continue.
    Fatal,
    /// Warning, the run continues with issues.
    Warning,
}

/// Error payload for error events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error code (`snake_case` identifier).
    pub code: String,
    /// Error severity.
    pub severity: ErrorSeverity,
    /// Human-readable error message.
    pub message: String,
    /// Suggested action to resolve the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Payload for a compilation run result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Recording identifier the run was filtered to.
    pub group_id: String,
    /// Source recording.
    pub source_media: PathBuf,
    /// Directory outputs were written to.
    pub output_dir: PathBuf,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Subjects that produced an output file.
    pub subjects_completed: usize,
    /// Subjects that failed.
    pub subjects_failed: usize,
    /// Per-subject records, in processing order.
    pub subjects: Vec<SubjectRecord>,
}

/// One subject's record in a run result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Subject identifier.
    pub subject: String,
    /// Terminal status.
    pub status: SubjectRecordStatus,
    /// Produced output file (if completed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Planned intervals (if dry run).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<Vec<TimeInterval>>,
    /// Total covered duration in seconds (if dry run).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<f64>,
    /// Error details (if failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SubjectErrorInfo>,
}

/// Error information for a failed subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectErrorInfo {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

/// Subject processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectRecordStatus {
    /// An output file was produced.
    Completed,
    /// Dry run, the plan was recorded but nothing was executed.
    Planned,
    /// The subject's engine work failed.
    Failed,
}
