//! Source file reading with compile-time limits and global logging integration

mod processor;

pub use processor::{process_file, FileMetadata, FileProcessingResult, FileProcessorError};
