//! Source file reader with compile-time size limits and global logging integration

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// File reading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::NotAFile { .. } => codes::file_processing::NOT_A_FILE,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }

    pub fn severity(&self) -> &'static str {
        self.error_code().severity().as_str()
    }

    pub fn category(&self) -> &'static str {
        self.error_code().category()
    }

    pub fn is_recoverable(&self) -> bool {
        self.error_code().is_recoverable()
    }

    fn from_io(error: &io::Error, path: &Path) -> Self {
        let path_str = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound { path: path_str },
            io::ErrorKind::PermissionDenied => {
                FileProcessorError::PermissionDenied { path: path_str }
            }
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding { path: path_str },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path_str, error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }

    /// Files above the compile-time threshold are reported as large
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// Whether the extension is one conventionally used for C or C++ sources
    pub fn is_cpp_source(&self) -> bool {
        matches!(
            self.extension.as_deref(),
            Some("c" | "h" | "cc" | "cpp" | "cxx" | "c++" | "hh" | "hpp" | "hxx" | "ipp" | "inl")
        )
    }
}

/// Source text plus the metadata gathered while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace (or nothing at all)
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Read a source file, enforcing the compile-time size limit
pub fn process_file(path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    let start_time = Instant::now();
    let file_str = path.display().to_string();

    log_debug!("Starting file processing", "file" => file_str);

    let metadata = collect_metadata(path).inspect_err(|error| {
        log_error!(error.error_code(), "Cannot access source file",
            "file" => file_str,
            "reason" => error);
    })?;

    if metadata.size > MAX_FILE_SIZE {
        let error = FileProcessorError::FileTooLarge {
            size: metadata.size,
            max_size: MAX_FILE_SIZE,
        };
        log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
            "file" => file_str,
            "size_bytes" => metadata.size,
            "size_human" => metadata.human_readable_size(),
            "limit_bytes" => MAX_FILE_SIZE,
            "limit_human" => human_readable(MAX_FILE_SIZE));
        return Err(error);
    }

    let source = fs::read_to_string(path).map_err(|e| {
        let error = FileProcessorError::from_io(&e, path);
        log_error!(error.error_code(), "Failed to read source file",
            "file" => file_str,
            "io_error" => e);
        error
    })?;

    let mut metadata = metadata;
    metadata.line_count = source.lines().count();

    if !metadata.is_cpp_source() {
        log_debug!("Reading file without a C/C++ extension",
            "file" => file_str,
            "extension" => metadata.extension.as_deref().unwrap_or("none"));
    }

    let result = FileProcessingResult {
        source,
        metadata,
        processing_duration: start_time.elapsed(),
    };

    log_success!(
        codes::success::FILE_PROCESSING_SUCCESS,
        "File processed successfully",
        "file" => file_str,
        "size_bytes" => result.metadata.size,
        "size_human" => result.metadata.human_readable_size(),
        "lines" => result.metadata.line_count,
        "chars" => result.char_count(),
        "is_large_file" => result.metadata.is_large_file(),
        "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(result)
}

fn collect_metadata(path: &Path) -> Result<FileMetadata, FileProcessorError> {
    let meta = fs::metadata(path).map_err(|e| FileProcessorError::from_io(&e, path))?;

    if !meta.is_file() {
        return Err(FileProcessorError::NotAFile {
            path: path.display().to_string(),
        });
    }

    Ok(FileMetadata {
        path: path.to_path_buf(),
        size: meta.len(),
        extension: path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase()),
        line_count: 0,
        modified: meta.modified().ok(),
    })
}

fn human_readable(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut scaled = size as f64;
    let mut unit_index = 0;

    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[unit_index])
    } else {
        format!("{:.2} {}", scaled, UNITS[unit_index])
    }
}
