//! Scratch directories for intermediate clips.
//!
//! Each subject gets its own scratch directory, released when the guard
//! drops. Directories also register in a process-wide list so the interrupt
//! handler can sweep intermediates that a Ctrl+C would otherwise orphan.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::constants::engine::CLIP_PREFIX;
use crate::error::{Error, Result};

/// RAII guard for one subject's intermediate clips.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a scratch directory under the system temp location.
    pub fn new() -> Result<Self> {
        let dir = TempDir::with_prefix("reelcut-")
            .map_err(|source| Error::ScratchCreate { source })?;
        register_scratch(dir.path());
        Ok(Self { dir })
    }

    /// Path of the scratch directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for the numbered intermediate clip, keeping the source extension.
    pub fn clip_path(&self, index: usize, extension: &str) -> PathBuf {
        self.path()
            .join(format!("{CLIP_PREFIX}{index:03}.{extension}"))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        // TempDir removes the tree itself once the guard is gone.
        unregister_scratch(self.dir.path());
    }
}

/// Global registry of live scratch directories for cleanup on signal.
static ACTIVE_SCRATCH: std::sync::LazyLock<std::sync::Mutex<Vec<PathBuf>>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(Vec::new()));

fn register_scratch(path: &Path) {
    if let Ok(mut dirs) = ACTIVE_SCRATCH.lock() {
        dirs.push(path.to_path_buf());
    }
}

fn unregister_scratch(path: &Path) {
    if let Ok(mut dirs) = ACTIVE_SCRATCH.lock() {
        dirs.retain(|p| p != path);
    }
}

/// Remove all registered scratch directories. Called on signal.
pub fn cleanup_all() {
    if let Ok(dirs) = ACTIVE_SCRATCH.lock() {
        for dir in dirs.iter() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
