//! Error types for reelcut.

/// Result type alias for reelcut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for reelcut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    // Ingestion errors: these abort the run before any engine call.
    /// Timestamp string did not match an accepted format.
    #[error("invalid timestamp '{text}' (expected HH:MM:SS or MM:SS)")]
    TimestampFormat {
        /// The offending timestamp text.
        text: String,
    },

    /// Event row failed validation.
    #[error("invalid event at line {line}: {message}")]
    EventRow {
        /// 1-based line number in the event table, counting the header.
        line: u64,
        /// Description of the problem.
        message: String,
    },

    /// Required column missing from the event table.
    #[error("event table is missing required column '{column}'")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// Failed to read or decode the event table.
    #[error("failed to read event table '{path}'")]
    EventRead {
        /// Path or URL the table was read from.
        path: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// URL is not a recognized spreadsheet link.
    #[error("not a recognized spreadsheet link: {url}")]
    InvalidSheetUrl {
        /// The rejected URL.
        url: String,
    },

    /// Remote spreadsheet fetch failed.
    #[error("failed to fetch spreadsheet from '{url}'")]
    SheetFetch {
        /// Export URL that failed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Remote spreadsheet fetch returned a non-success status.
    #[error("spreadsheet fetch returned HTTP {status} for '{url}'")]
    SheetStatus {
        /// Export URL that was fetched.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Source media file does not exist.
    #[error("source media file does not exist: {path}")]
    SourceMediaNotFound {
        /// Path to the missing media file.
        path: std::path::PathBuf,
    },

    /// Required command-line argument was not provided.
    #[error("missing required argument --{name}")]
    MissingArgument {
        /// Long flag name of the missing argument.
        name: String,
    },

    // Engine errors: these are scoped to the subject being processed.
    /// Media engine binary could not be launched.
    #[error("failed to launch '{program}' (is it installed and on PATH?)")]
    EngineSpawn {
        /// Name of the engine binary.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Media engine invocation returned failure.
    #[error("media engine {operation} failed: {detail}")]
    EngineFailure {
        /// The operation that failed (extract or concatenate context).
        operation: String,
        /// Diagnostic output from the engine.
        detail: String,
    },

    /// Concatenation rejected clips with mismatched stream parameters.
    #[error("cannot concatenate clips with mismatched stream parameters: {detail}")]
    IncompatibleStreams {
        /// Diagnostic output from the engine.
        detail: String,
    },

    /// Failed to write the concat list file.
    #[error("failed to write concat list '{path}'")]
    ConcatListWrite {
        /// Path to the list file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreate {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a scratch directory for intermediate clips.
    #[error("failed to create scratch directory")]
    ScratchCreate {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// One or more subjects failed during compilation.
    #[error("{failed} of {total} subjects failed")]
    SubjectsFailed {
        /// Number of failed subjects.
        failed: usize,
        /// Number of subjects attempted.
        total: usize,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Stable `snake_case` code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::ConfigDirNotFound => "config_dir_not_found",
            Self::ConfigRead { .. } => "config_read",
            Self::ConfigParse { .. } => "config_parse",
            Self::ConfigWrite { .. } => "config_write",
            Self::ConfigSerialize { .. } => "config_serialize",
            Self::TimestampFormat { .. } => "timestamp_format",
            Self::EventRow { .. } => "event_row",
            Self::MissingColumn { .. } => "missing_column",
            Self::EventRead { .. } => "event_read",
            Self::InvalidSheetUrl { .. } => "invalid_sheet_url",
            Self::SheetFetch { .. } => "sheet_fetch",
            Self::SheetStatus { .. } => "sheet_status",
            Self::SourceMediaNotFound { .. } => "source_media_not_found",
            Self::MissingArgument { .. } => "missing_argument",
            Self::EngineSpawn { .. } => "engine_spawn",
            Self::EngineFailure { .. } => "engine_failure",
            Self::IncompatibleStreams { .. } => "incompatible_streams",
            Self::ConcatListWrite { .. } => "concat_list_write",
            Self::OutputDirCreate { .. } => "output_dir_create",
            Self::ScratchCreate { .. } => "scratch_create",
            Self::SubjectsFailed { .. } => "subjects_failed",
            Self::Internal { .. } => "internal",
        }
    }
}
