//! Baker configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file)
//! and can be overridden per invocation on the command line.

use std::env;
use std::path::PathBuf;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Top-level baker configuration.
#[derive(Debug, Clone)]
pub struct BakerConfig {
    /// Log level name (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log line format
    pub log_format: LogFormat,

    /// Directory for baked atlases and previews when no explicit path is given
    pub output_dir: PathBuf,
}

impl Default for BakerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            output_dir: PathBuf::from("."),
        }
    }
}

impl BakerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("PALETTE_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: env::var("PALETTE_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
            output_dir: env::var("PALETTE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
        }
    }

    /// Apply a command-line log level over the environment value.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }
}
