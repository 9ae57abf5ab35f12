//! Log events: one timestamped record with a level, a code and optional
//! source position and key/value context

use super::codes::Code;
use crate::position::Position;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Event levels, most severe first; a logger at level `L` accepts `<= L`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
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
}

const GENERIC_WARNING: Code = Code::new("W000");
const GENERIC_INFO: Code = Code::new("I000");
const GENERIC_DEBUG: Code = Code::new("D000");

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<Position>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: truncate_message(message),
            position: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, GENERIC_WARNING, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, GENERIC_INFO, message)
    }

    /// Info-level event carrying a registered success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, GENERIC_DEBUG, message)
    }

    pub fn with_position(self, position: Position) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }

    /// Later values replace earlier ones under the same key
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    pub fn severity(&self) -> &'static str {
        self.code.severity().as_str()
    }

    pub fn category(&self) -> &'static str {
        self.code.category()
    }

    /// `[LEVEL] CODE - message[ at line:column][ (k=v, ...)]`
    pub fn format(&self) -> String {
        let mut line = format!("[{}] {} - {}", self.level.as_str(), self.code, self.message);
        if let Some(position) = self.position {
            let _ = write!(line, " at {}", position);
        }
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            let _ = write!(line, " ({})", pairs.join(", "));
        }
        line
    }

    /// One-line JSON object; errors also carry the code's description and action
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut object = json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            object["error_metadata"] = json!({
                "description": self.code.description(),
                "recommended_action": self.code.recommended_action(),
            });
        }
        if let Some(position) = &self.position {
            object["position"] = serde_json::to_value(position)?;
        }
        if !self.context.is_empty() {
            object["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&object)
    }
}

/// Cut to the configured limit (in chars) and mark the cut with `...`
fn truncate_message(message: &str) -> String {
    let limit = super::config::get_max_log_message_length();
    match message.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "File not found");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E005");
        assert_eq!(event.message, "File not found");
        assert_eq!(event.category(), "FileProcessing");
    }

    #[test]
    fn test_success_event_creation() {
        let event = LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "Tokenized");

        assert!(event.is_info());
        assert_eq!(event.code.as_str(), "I020");
        assert_eq!(event.category(), "Lexical");
    }

    #[test]
    fn test_event_formatting() {
        let event = LogEvent::debug("Skipped character")
            .with_position(Position::new(4, 2, 3))
            .with_context("char", "@");

        assert_eq!(
            event.format(),
            "[DEBUG] D000 - Skipped character at 2:3 (char=@)"
        );
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::file_processing::PERMISSION_DENIED, "Access denied")
            .with_context("file", "main.cpp");

        let json = event.format_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["code"], "E009");
        assert_eq!(value["message"], "Access denied");
        assert_eq!(value["context"]["file"], "main.cpp");
        assert!(value["error_metadata"]["description"].is_string());
        assert!(value.get("position").is_none());
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let limit = crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
        let long = "x".repeat(limit + 10);
        let event = LogEvent::info(&long);
        assert_eq!(event.message.chars().count(), limit + 3);
        assert!(event.message.ends_with("..."));
    }
}
