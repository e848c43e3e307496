//! Run orchestration: events in, per-subject highlight reels out.

mod runner;

pub use runner::{
    RunRequest, SubjectOutcome, SubjectStatus, output_path_for, run, run_with_progress,
    sanitize_subject,
};
