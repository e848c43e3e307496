//! Media engine abstraction.
//!
//! The planner decides what to cut, an engine does the cutting. Keeping the
//! engine behind a trait lets the pipeline run against a fake in tests and
//! keeps process-spawning concerns out of planning code.

mod ffmpeg;

pub use ffmpeg::FfmpegEngine;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::plan::TimeInterval;

/// Operations the pipeline needs from a media backend.
///
/// All operations block until the output file exists or the call has failed.
/// Both use lossless stream copy; boundary snapping to the nearest usable
/// frame is the backend's concern.
pub trait MediaEngine {
    /// Cut `interval` out of `source` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the backend cannot be launched or exits
    /// with failure.
    fn extract(&self, source: &Path, interval: TimeInterval, dest: &Path) -> Result<()>;

    /// Join `clips` in order into `dest` without re-encoding.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::IncompatibleStreams`] when the clips'
    /// stream parameters disagree, or another engine error for any other
    /// backend failure.
    fn concatenate(&self, clips: &[PathBuf], dest: &Path) -> Result<()>;
}
