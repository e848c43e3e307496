//! Progress bar utilities for subject processing.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for processing multiple subjects.
pub fn create_subject_progress(total_subjects: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_subjects == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_subjects as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} subjects ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    Some(pb)
}

/// Set the message shown next to a progress bar.
pub fn set_progress_message(pb: Option<&ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.set_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}
