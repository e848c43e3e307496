//! Configuration type definitions.

use crate::constants::engine::FFMPEG_BIN;
use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_PADDING};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default run settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Media engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Default run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Seconds added before and after every event.
    pub padding: f64,

    /// Directory output files are written to.
    pub output_dir: PathBuf,

    /// Emit structured JSON output by default.
    pub json: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            json: false,
        }
    }
}

/// Media engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name or path of the ffmpeg binary.
    pub ffmpeg: String,

    /// Extra arguments appended to every ffmpeg invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg: FFMPEG_BIN.to_string(),
            extra_args: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.padding, DEFAULT_PADDING);
        assert_eq!(config.defaults.output_dir, PathBuf::from("."));
        assert!(!config.defaults.json);
        assert_eq!(config.engine.ffmpeg, "ffmpeg");
        assert!(config.engine.extra_args.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[defaults]
padding = 1.5
"#,
        )
        .unwrap();

        assert_eq!(config.defaults.padding, 1.5);
        assert_eq!(config.defaults.output_dir, PathBuf::from("."));
        assert_eq!(config.engine.ffmpeg, "ffmpeg");
    }

    #[test]
    fn test_engine_section_parses() {
        let config: Config = toml::from_str(
            r#"
[engine]
ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
extra_args = ["-loglevel", "error"]
"#,
        )
        .unwrap();

        assert_eq!(config.engine.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.engine.extra_args, vec!["-loglevel", "error"]);
    }
}
