//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

/// Sink for events that passed the service's level filter
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of one logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Backend and level taken from the runtime logging preferences
    pub fn from_preferences() -> Self {
        let line_format = if config::use_structured_logging() {
            LineFormat::Json
        } else {
            LineFormat::Text
        };
        Self::new(Arc::new(StderrLogger::new(line_format)), config::get_min_log_level())
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// How [`StderrLogger`] renders one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Text,
    Json,
}

/// Writes one line per event to stderr. Stdout is left to the token listing.
pub struct StderrLogger {
    format: LineFormat,
}

impl StderrLogger {
    pub fn new(format: LineFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.format {
            LineFormat::Text => event.format(),
            LineFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        }
    }
}

impl Logger for StderrLogger {
    fn log(&self, event: &LogEvent) {
        let line = self.render(event);
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

/// Forwards events to the `log` facade so host applications choose the sink
#[cfg(feature = "log")]
pub struct LogFacadeLogger;

#[cfg(feature = "log")]
impl Logger for LogFacadeLogger {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        };
        log::log!(target: "cpplex", level, "{}", event.format());
    }
}

#[cfg(feature = "log")]
impl LogFacadeLogger {
    /// Service whose level follows the `log` crate's global max level, so
    /// whatever filter the host installed (e.g. `RUST_LOG`) decides
    pub fn service() -> LoggingService {
        LoggingService::new(Arc::new(LogFacadeLogger), Self::level_for(log::max_level()))
    }

    fn level_for(filter: log::LevelFilter) -> LogLevel {
        match filter {
            log::LevelFilter::Off | log::LevelFilter::Error => LogLevel::Error,
            log::LevelFilter::Warn => LogLevel::Warning,
            log::LevelFilter::Info => LogLevel::Info,
            log::LevelFilter::Debug | log::LevelFilter::Trace => LogLevel::Debug,
        }
    }
}

/// Keeps every event; used by tests
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn filtered(&self, keep: impl Fn(&LogEvent) -> bool) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| keep(e)).cloned().collect()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn errors(&self) -> Vec<LogEvent> {
        self.filtered(LogEvent::is_error)
    }

    pub fn events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.filtered(|e| e.code == code)
    }

    /// Whether an event at `level` carrying `code` was recorded
    pub fn recorded(&self, level: LogLevel, code: Code) -> bool {
        self.lock().iter().any(|e| e.level == level && e.code == code)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.lock().push(event.clone());
    }
}
