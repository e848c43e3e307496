//! Structured output, reporting and progress.

mod json_envelope;
pub mod progress;
mod reporter;

pub use json_envelope::{
    ErrorPayload, ErrorSeverity, EventType, JsonEnvelope, ResultType, RunPayload, SPEC_VERSION,
    SubjectErrorInfo, SubjectRecord, SubjectRecordStatus,
};
pub use reporter::{emit_json_error, emit_json_result, print_outcomes, run_payload};
