//! Configuration management for shiftpack
//!
//! Settings are read from environment variables with sensible defaults;
//! command-line flags override them.
//!
//! # Environment Variables
//!
//! - `SHIFTPACK_LOG_LEVEL`: Logging level - default: "info"
//! - `SHIFTPACK_LOG_JSON`: Emit JSON log lines (true|false) - default: "false"
//! - `SHIFTPACK_OUTPUT_DIR`: Where artifacts are written - default: "./output"

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;
const DEFAULT_OUTPUT_DIR: &str = "./output";
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftpackConfig {
    pub log_level: String,
    pub log_json: bool,
    pub output_dir: PathBuf,
}

impl Default for ShiftpackConfig {
    fn default() -> Self {
        let log_level = env::var("SHIFTPACK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("SHIFTPACK_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        let output_dir = env::var("SHIFTPACK_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Self {
            log_level,
            log_json,
            output_dir,
        }
    }
}

impl ShiftpackConfig {
    /// Checks that the log level is recognised and the output path is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "output directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Overrides the log level; values are normalised to lowercase.
    pub fn with_log_level(mut self, log_level: impl AsRef<str>) -> Self {
        self.log_level = log_level.as_ref().to_lowercase();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        map.insert(
            "output_dir".to_string(),
            self.output_dir.display().to_string(),
        );
        map
    }
}
