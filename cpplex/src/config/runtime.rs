//! Runtime preferences: environment-driven defaults, optionally overridden by a TOML file

use crate::logging::codes::{self, Code};
use crate::logging::LogLevel as EventLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boolean from the environment; unset or unparsable values give `default`
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessPreferences {
    /// Replace a leading byte-order mark with a space
    pub strip_bom: bool,

    /// Blank backslash-newline continuations
    pub splice_lines: bool,

    /// Blank `//` and `/* */` comments
    pub strip_comments: bool,
}

impl Default for PreprocessPreferences {
    fn default() -> Self {
        Self {
            strip_bom: env_flag(env_vars::PREPROCESS_STRIP_BOM, true),
            splice_lines: env_flag(env_vars::PREPROCESS_SPLICE_LINES, true),
            strip_comments: env_flag(env_vars::PREPROCESS_STRIP_COMMENTS, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Emit a debug event for every character no rule matched
    pub log_skipped_characters: bool,

    /// Emit a per-category summary once tokenization completes
    pub log_token_summary: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            log_skipped_characters: env_flag(env_vars::LEXICAL_LOG_SKIPPED, false),
            log_token_summary: env_flag(env_vars::LEXICAL_LOG_SUMMARY, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// One JSON object per event instead of text lines
    pub use_structured_logging: bool,

    /// Events below this level are dropped
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> EventLevel {
        match self {
            LogLevel::Error => EventLevel::Error,
            LogLevel::Warning => EventLevel::Warning,
            LogLevel::Info => EventLevel::Info,
            LogLevel::Debug => EventLevel::Debug,
        }
    }
}

/// Accepts names (`warn`, `Warning`) and the numeric levels `0..=3`
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// All runtime preferences, loadable from a TOML file.
///
/// Sections and keys missing from the file fall back to their
/// environment-driven defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub preprocess: PreprocessPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl Preferences {
    /// Parse preferences from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a TOML preferences file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read preferences file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preferences in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::Read { .. } => codes::config::PREFERENCES_READ_ERROR,
            ConfigError::Parse { .. } => codes::config::PREFERENCES_PARSE_ERROR,
        }
    }
}

pub mod env_vars {
    pub const PREPROCESS_STRIP_BOM: &str = "CPPLEX_PREPROCESS_STRIP_BOM";
    pub const PREPROCESS_SPLICE_LINES: &str = "CPPLEX_PREPROCESS_SPLICE_LINES";
    pub const PREPROCESS_STRIP_COMMENTS: &str = "CPPLEX_PREPROCESS_STRIP_COMMENTS";

    pub const LEXICAL_LOG_SKIPPED: &str = "CPPLEX_LEXICAL_LOG_SKIPPED";
    pub const LEXICAL_LOG_SUMMARY: &str = "CPPLEX_LEXICAL_LOG_SUMMARY";

    pub const LOGGING_USE_STRUCTURED: &str = "CPPLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "CPPLEX_LOGGING_MIN_LEVEL";
}
