//! Global logging module for cpplex
//!
//! Provides thread-safe global logging with per-thread file context and a
//! macro interface. Until one of the `init_*` functions runs, every macro is
//! a no-op, so library users who never initialize logging see nothing.

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
#[cfg(feature = "log")]
pub use service::LogFacadeLogger;
pub use service::{LineFormat, Logger, LoggingService, MemoryLogger, StderrLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// The file currently being processed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
}

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Install a stderr logger configured from the runtime logging preferences
pub fn init_global_logging() -> Result<(), String> {
    install(Arc::new(LoggingService::from_preferences()))
}

/// Initialize with a custom service (custom backends and tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    install(service)
}

fn install(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether a debug event would reach a logger (used by `log_debug!`)
pub fn debug_enabled() -> bool {
    try_get_global_logger().is_some_and(|logger| logger.should_log(LogLevel::Debug))
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_file_context(file_path: PathBuf) {
    FILE_CONTEXT.with(|ctx| ctx.replace(Some(FileContext { file_path })));
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| ctx.replace(None));
}

/// Context attached as `file` to events emitted on this thread
pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Restores the enclosing context on drop, including during unwinding
struct FileContextGuard {
    previous: Option<FileContext>,
}

impl Drop for FileContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        FILE_CONTEXT.with(|ctx| ctx.replace(previous));
    }
}

/// Run `f` with `file_path` as the file context; nests
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| ctx.replace(Some(FileContext { file_path })));
    let _guard = FileContextGuard { previous };
    f()
}

/// Attach file context and hand the event to the global logger, if any
pub fn emit(event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let event = match get_current_file_context() {
        Some(file_ctx) => event.with_context("file", &file_ctx.file_path.display().to_string()),
        None => event,
    };

    logger.log_event(event);
}

/// Shared in-memory logger installed as the global logger for unit tests.
///
/// Tests run in parallel against the same logger, so assertions must filter
/// for events they produced themselves.
#[cfg(test)]
pub(crate) fn test_memory_logger() -> Arc<MemoryLogger> {
    static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();

    MEMORY
        .get_or_init(|| {
            let memory = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(memory.clone(), LogLevel::Debug);
            // Another test may have won the race; then this logger stays detached.
            let _ = init_global_logging_with_service(Arc::new(service));
            memory
        })
        .clone()
}
