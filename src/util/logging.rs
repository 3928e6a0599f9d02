//! Structured logging setup for shiftpack
//!
//! Logging goes through the `tracing` ecosystem and is written to stderr so
//! that reports on stdout stay machine-readable.
//!
//! # Example
//!
//! ```no_run
//! use shiftpack::util::logging;
//!
//! logging::init_from_env();
//!
//! use tracing::{debug, info};
//! info!("Migration started");
//! debug!(source = "./legacy-app", "Resolving manifests");
//! ```

use crate::config::ShiftpackConfig;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// Emit JSON lines instead of human-readable output
    pub use_json: bool,

    /// Include the module target (e.g., shiftpack::classify) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON lines with full metadata, for log collectors.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self::with_level(Level::DEBUG)
    }

    /// `SHIFTPACK_LOG_JSON=true` selects the production preset.
    pub fn from_config(config: &ShiftpackConfig) -> Self {
        let preset = if config.log_json {
            Self::production()
        } else {
            Self::default()
        };
        Self {
            level: parse_level(&config.log_level),
            ..preset
        }
    }

    /// Command-line verbosity takes precedence over the configured level.
    pub fn with_cli_overrides(mut self, log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        if let Some(level) = log_level {
            self.level = parse_level(level);
        } else if verbose {
            self.level = Level::DEBUG;
        } else if quiet {
            self.level = Level::ERROR;
        }
        self
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn directive(&self) -> String {
        format!("{}={}", crate::NAME, self.level)
    }
}

/// Parses a log level, case-insensitively. Unknown values fall back to INFO.
///
/// ```
/// use shiftpack::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(config.directive())
        };

        // Exactly one of the two layers is present.
        let json = config.use_json.then(|| {
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(config.include_target)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_ids(config.include_thread_ids)
                .with_thread_names(config.include_thread_ids)
        });
        let text = (!config.use_json).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.include_target)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_thread_ids(config.include_thread_ids)
                .with_thread_names(config.include_thread_ids)
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(text)
            .init();
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from `SHIFTPACK_LOG_LEVEL` / `SHIFTPACK_LOG_JSON`.
pub fn init_from_env() {
    init_logging(LoggingConfig::from_config(&ShiftpackConfig::default()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app_config(level: &str, json: bool) -> ShiftpackConfig {
        ShiftpackConfig {
            log_level: level.to_string(),
            log_json: json,
            output_dir: PathBuf::from("./output"),
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
        assert!(!config.include_thread_ids);
    }

    #[test]
    fn test_with_level() {
        let config = LoggingConfig::with_level(Level::WARN);
        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
        assert!(config.include_target);
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production();
        assert_eq!(config.level, Level::INFO);
        assert!(config.use_json);
        assert!(config.include_location);
        assert!(config.include_thread_ids);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.use_json);
        assert!(!config.include_thread_ids);
    }

    #[test]
    fn test_from_config() {
        let config = LoggingConfig::from_config(&app_config("warn", true));
        assert_eq!(config.level, Level::WARN);
        assert!(config.use_json);
        assert!(config.include_location);
        assert!(config.include_thread_ids);

        let config = LoggingConfig::from_config(&app_config("debug", false));
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.include_location);
        assert!(config.include_target);
    }

    #[test]
    fn test_cli_overrides() {
        let base = LoggingConfig::from_config(&app_config("warn", false));

        assert_eq!(base.clone().with_cli_overrides(None, false, false).level, Level::WARN);
        assert_eq!(base.clone().with_cli_overrides(None, true, false).level, Level::DEBUG);
        assert_eq!(base.clone().with_cli_overrides(None, false, true).level, Level::ERROR);
        assert_eq!(
            base.with_cli_overrides(Some("trace"), false, true).level,
            Level::TRACE
        );
    }

    #[test]
    fn test_directive() {
        assert_eq!(LoggingConfig::default().directive(), "shiftpack=INFO");
    }
}
