//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "reelcut";

/// Default padding in seconds added around each raw interval.
pub const DEFAULT_PADDING: f64 = 0.0;

/// Maximum allowed padding in seconds.
///
/// Padding exists to keep a little context around each event and to make
/// near-adjacent events merge. Values beyond a few minutes usually indicate
/// a units mistake on the command line.
pub const MAX_PADDING: f64 = 300.0;

/// Default output directory for compiled reels.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Event table column names.
pub mod columns {
    /// Column scoping rows to one recording/session.
    pub const GROUP_ID: &str = "groupId";
    /// Column holding the interval start timestamp.
    pub const START_TIME: &str = "startTime";
    /// Column holding the interval stop timestamp.
    pub const STOP_TIME: &str = "stopTime";
    /// Column naming the subject the row belongs to.
    pub const SUBJECT_ID: &str = "subjectId";
    /// Optional inclusion flag column; blank or absent means included.
    pub const INCLUDED: &str = "included";

    /// Columns that must be present in every event table.
    pub const REQUIRED: &[&str] = &[GROUP_ID, START_TIME, STOP_TIME, SUBJECT_ID];
}

/// Remote spreadsheet link shapes.
pub mod sheets {
    /// Host that identifies a spreadsheet link.
    pub const HOST: &str = "docs.google.com";
    /// Path segment preceding the sheet identifier.
    pub const PATH_PREFIX: &str = "/spreadsheets/d/";
    /// Tab identifier used when the link does not name one.
    pub const DEFAULT_GID: &str = "0";
}

/// Media engine defaults.
pub mod engine {
    /// Engine binary invoked for extraction and concatenation.
    pub const FFMPEG_BIN: &str = "ffmpeg";
    /// Intermediate clips are named `clip_NNN.<ext>` inside the scratch dir.
    pub const CLIP_PREFIX: &str = "clip_";
    /// Fallback extension when the source media has none.
    pub const DEFAULT_EXTENSION: &str = "mp4";
}

/// Fallback subject name when an id sanitizes to nothing.
pub const FALLBACK_SUBJECT: &str = "subject";
