//! End-to-end run: load events, build plans, drive the media engine.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::FALLBACK_SUBJECT;
use crate::constants::engine::DEFAULT_EXTENSION;
use crate::engine::MediaEngine;
use crate::error::{Error, Result};
use crate::events::{EventSource, load_events};
use crate::output::progress;
use crate::plan::{ClipPlan, TimeInterval, build_plans};
use crate::scratch::ScratchDir;

/// Everything one compilation run needs to know.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Source recording the events refer to.
    pub source_media: PathBuf,
    /// Where the event table comes from.
    pub events: EventSource,
    /// Recording identifier the events are filtered to.
    pub group_id: String,
    /// Seconds added before and after every event.
    pub padding: f64,
    /// Directory the per-subject outputs land in.
    pub output_dir: PathBuf,
    /// Plan only, touch nothing.
    pub dry_run: bool,
}

impl RunRequest {
    /// Request with default padding, output directory and mode.
    pub fn new(source_media: PathBuf, events: EventSource, group_id: String) -> Self {
        Self {
            source_media,
            events,
            group_id,
            padding: crate::constants::DEFAULT_PADDING,
            output_dir: PathBuf::from(crate::constants::DEFAULT_OUTPUT_DIR),
            dry_run: false,
        }
    }
}

/// What happened to one subject.
#[derive(Debug)]
pub struct SubjectOutcome {
    /// Subject this outcome belongs to.
    pub subject_id: String,
    /// Terminal state of the subject's pipeline.
    pub status: SubjectStatus,
}

/// Terminal state of one subject's pipeline.
#[derive(Debug)]
pub enum SubjectStatus {
    /// Output artifact was produced.
    Completed {
        /// Path of the produced file.
        output: PathBuf,
    },
    /// Dry run: the plan that would have been executed.
    Planned {
        /// Intervals that would be extracted, in order.
        intervals: Vec<TimeInterval>,
        /// Total covered duration in seconds.
        total_duration: f64,
    },
    /// The subject's engine work failed; other subjects are unaffected.
    Failed {
        /// What went wrong.
        error: Error,
    },
}

/// Compile highlight reels for every subject in the run.
///
/// Ingestion problems (unreadable table, bad rows, missing source media)
/// abort the whole run. Engine failures are scoped to their subject and
/// recorded in that subject's outcome.
///
/// # Errors
///
/// Returns an error when the source media is missing or the event table
/// cannot be loaded or validated.
pub fn run(request: &RunRequest, engine: &dyn MediaEngine) -> Result<Vec<SubjectOutcome>> {
    run_with_progress(request, engine, false)
}

/// Same as [`run`], with an interactive progress bar over subjects.
pub fn run_with_progress(
    request: &RunRequest,
    engine: &dyn MediaEngine,
    progress_enabled: bool,
) -> Result<Vec<SubjectOutcome>> {
    if !request.source_media.is_file() {
        return Err(Error::SourceMediaNotFound {
            path: request.source_media.clone(),
        });
    }

    info!(
        "Starting highlight compilation for group: {}",
        request.group_id
    );

    let events = load_events(&request.events, &request.group_id)?;
    if events.is_empty() {
        warn!("No events matched group '{}'", request.group_id);
        return Ok(Vec::new());
    }

    let plans = build_plans(&events, &request.source_media, request.padding)?;
    execute(&plans, engine, request, progress_enabled)
}

fn execute(
    plans: &[ClipPlan],
    engine: &dyn MediaEngine,
    request: &RunRequest,
    progress_enabled: bool,
) -> Result<Vec<SubjectOutcome>> {
    if !request.dry_run {
        fs::create_dir_all(&request.output_dir).map_err(|source| Error::OutputDirCreate {
            path: request.output_dir.clone(),
            source,
        })?;
    }

    let bar = progress::create_subject_progress(plans.len(), progress_enabled && !request.dry_run);
    let mut outcomes = Vec::with_capacity(plans.len());

    for plan in plans {
        let merged = &plan.merged;
        progress::set_progress_message(bar.as_ref(), plan.subject_id());

        let status = if request.dry_run {
            SubjectStatus::Planned {
                intervals: merged.intervals.clone(),
                total_duration: merged.total_duration(),
            }
        } else {
            info!(
                "Subject: {} | Clips: {} | Total Duration: {:.2}s",
                plan.subject_id(),
                merged.intervals.len(),
                merged.total_duration()
            );
            match process_plan(plan, engine, &request.output_dir) {
                Ok(output) => SubjectStatus::Completed { output },
                Err(error) => {
                    warn!("Failed to compile subject {}: {error}", plan.subject_id());
                    SubjectStatus::Failed { error }
                }
            }
        };

        outcomes.push(SubjectOutcome {
            subject_id: plan.subject_id().to_string(),
            status,
        });
        progress::inc_progress(bar.as_ref());
    }

    progress::finish_progress(bar, "done");
    Ok(outcomes)
}

/// Extract and concatenate one subject's clips.
///
/// Intermediate clips live in a scratch directory that is released when this
/// function returns, on success and on failure alike.
fn process_plan(plan: &ClipPlan, engine: &dyn MediaEngine, output_dir: &Path) -> Result<PathBuf> {
    let extension = media_extension(&plan.source_media);
    let scratch = ScratchDir::new()?;
    let mut clips = Vec::with_capacity(plan.merged.intervals.len());

    info!("Generating clips for {}...", plan.subject_id());
    for (index, interval) in plan.merged.intervals.iter().enumerate() {
        let clip = scratch.clip_path(index, &extension);
        engine.extract(&plan.source_media, *interval, &clip)?;
        clips.push(clip);
    }

    let output = output_path_for(&plan.source_media, output_dir, plan.subject_id());
    info!(
        "Concatenating {} clips into {}...",
        clips.len(),
        output.display()
    );
    engine.concatenate(&clips, &output)?;
    info!("Successfully created {}", output.display());

    Ok(output)
}

/// Deterministic output path: `{stem}_{subject}.{extension}` inside `output_dir`.
pub fn output_path_for(source: &Path, output_dir: &Path, subject_id: &str) -> PathBuf {
    // to_string_lossy() keeps non-UTF-8 names usable instead of failing
    let stem = source
        .file_stem()
        .map_or_else(|| Cow::Borrowed("output"), |s| s.to_string_lossy());
    let extension = media_extension(source);
    let subject = sanitize_subject(subject_id);
    output_dir.join(format!("{stem}_{subject}.{extension}"))
}

/// Make a subject id safe for file names.
///
/// Keeps alphanumerics, space, `_` and `-`, trims, and turns spaces into
/// underscores. An id with nothing left falls back to a fixed name.
pub fn sanitize_subject(subject_id: &str) -> String {
    let cleaned: String = subject_id
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim().replace(' ', "_");
    if cleaned.is_empty() {
        FALLBACK_SUBJECT.to_string()
    } else {
        cleaned
    }
}

fn media_extension(source: &Path) -> String {
    source.extension().map_or_else(
        || DEFAULT_EXTENSION.to_string(),
        |ext| ext.to_string_lossy().into_owned(),
    )
}
