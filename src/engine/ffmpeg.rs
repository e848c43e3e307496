//! ffmpeg-backed media engine.
//!
//! Extraction seeks with `-ss` before `-i` and stream-copies with
//! `-avoid_negative_ts 1` so cuts land on usable frames without re-encoding.
//! Concatenation goes through the concat demuxer with a generated list file,
//! which is removed again on every exit path.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

use crate::constants::engine::FFMPEG_BIN;
use crate::error::{Error, Result};
use crate::plan::TimeInterval;

use super::MediaEngine;

/// How many trailing stderr lines to keep in error messages. ffmpeg front-loads
/// its banner and build info; the actual failure is at the end.
const STDERR_TAIL_LINES: usize = 5;

/// Phrases ffmpeg prints when concatenated clips disagree on stream
/// parameters. Stream copy cannot reconcile these, so the failure is an
/// input problem rather than an engine fault.
const STREAM_MISMATCH_MARKERS: &[&str] = &["do not match", "mismatch", "incompatible"];

/// Engine that shells out to an ffmpeg binary.
pub struct FfmpegEngine {
    bin: String,
    extra_args: Vec<String>,
}

impl FfmpegEngine {
    /// Create an engine using the given ffmpeg binary name or path.
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append user-supplied arguments to every invocation, ahead of the
    /// output path.
    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    fn run(&self, args: &[OsString]) -> Result<Output> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args).stdin(Stdio::null());
        debug!("running {cmd:?}");

        cmd.output().map_err(|source| Error::EngineSpawn {
            program: self.bin.clone(),
            source,
        })
    }
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new(FFMPEG_BIN)
    }
}

impl MediaEngine for FfmpegEngine {
    fn extract(&self, source: &Path, interval: TimeInterval, dest: &Path) -> Result<()> {
        let mut args = extract_args(source, interval, dest);
        insert_extra_args(&mut args, &self.extra_args);

        let output = self.run(&args)?;
        if !output.status.success() {
            return Err(Error::EngineFailure {
                operation: "extract".to_string(),
                detail: stderr_tail(&output.stderr),
            });
        }
        Ok(())
    }

    fn concatenate(&self, clips: &[PathBuf], dest: &Path) -> Result<()> {
        if clips.is_empty() {
            return Err(Error::Internal {
                message: "concatenate called with no clips".to_string(),
            });
        }

        let list_path = concat_list_path(dest);
        let list_body = concat_list(clips)?;
        fs::write(&list_path, list_body).map_err(|source| Error::ConcatListWrite {
            path: list_path.clone(),
            source,
        })?;

        let mut args = concat_args(&list_path, dest);
        insert_extra_args(&mut args, &self.extra_args);

        // Run before removing the list file, but remove it no matter how
        // the run went.
        let result = self.run(&args);
        if let Err(e) = fs::remove_file(&list_path) {
            warn!("failed to remove concat list '{}': {e}", list_path.display());
        }

        let output = result?;
        if !output.status.success() {
            return Err(classify_concat_failure(&output.stderr));
        }
        Ok(())
    }
}

fn extract_args(source: &Path, interval: TimeInterval, dest: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-ss".into(),
        format!("{:.3}", interval.start).into(),
        "-i".into(),
        source.into(),
        "-t".into(),
        format!("{:.3}", interval.duration()).into(),
        "-c".into(),
        "copy".into(),
        "-avoid_negative_ts".into(),
        "1".into(),
        dest.into(),
    ]
}

fn concat_args(list_path: &Path, dest: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        list_path.into(),
        "-c".into(),
        "copy".into(),
        "-movflags".into(),
        "+faststart".into(),
        dest.into(),
    ]
}

/// The concat demuxer list lives next to the output it produces.
fn concat_list_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".txt");
    PathBuf::from(name)
}

/// Render the concat demuxer list. Paths are made absolute so the list
/// works regardless of ffmpeg's working directory.
fn concat_list(clips: &[PathBuf]) -> Result<String> {
    let mut body = String::new();
    for clip in clips {
        let abs = std::path::absolute(clip)?;
        body.push_str(&format!("file '{}'\n", abs.display()));
    }
    Ok(body)
}

fn insert_extra_args(args: &mut Vec<OsString>, extra: &[String]) {
    if extra.is_empty() {
        return;
    }
    // Keep the output path last.
    let at = args.len() - 1;
    for (offset, arg) in extra.iter().enumerate() {
        args.insert(at + offset, arg.into());
    }
}

fn classify_concat_failure(stderr: &[u8]) -> Error {
    let text = String::from_utf8_lossy(stderr);
    let lowered = text.to_lowercase();
    if STREAM_MISMATCH_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        Error::IncompatibleStreams {
            detail: stderr_tail(stderr),
        }
    } else {
        Error::EngineFailure {
            operation: "concatenate".to_string(),
            detail: stderr_tail(stderr),
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        return "no diagnostic output".to_string();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
