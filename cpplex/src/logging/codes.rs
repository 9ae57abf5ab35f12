//! Event codes and their metadata
//!
//! Every code that can appear on a [`LogEvent`](super::LogEvent) is declared
//! here together with its category, severity and a recommended action.
//! Unregistered codes (the generic `W000`, `I000`, `D000`) fall back to
//! neutral metadata.

use std::fmt;

/// Code attached to a log event, e.g. `E005` or `I020`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registered metadata, if this code is in the table
    pub fn info(self) -> Option<&'static CodeInfo> {
        REGISTRY.iter().find(|info| info.code == self)
    }

    pub fn category(self) -> &'static str {
        self.info().map_or("Unknown", |info| info.category)
    }

    pub fn severity(self) -> Severity {
        self.info().map_or(Severity::Medium, |info| info.severity)
    }

    pub fn is_recoverable(self) -> bool {
        self.info().map_or(true, |info| info.recoverable)
    }

    pub fn description(self) -> &'static str {
        self.info().map_or("Unknown error", |info| info.description)
    }

    pub fn recommended_action(self) -> &'static str {
        self.info()
            .map_or("No specific action available", |info| info.action)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// One row of the code table
#[derive(Debug)]
pub struct CodeInfo {
    pub code: Code,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub action: &'static str,
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Reading the source file
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const NOT_A_FILE: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
}

/// Loading a preferences file
pub mod config {
    use super::Code;

    pub const PREFERENCES_READ_ERROR: Code = Code::new("E015");
    pub const PREFERENCES_PARSE_ERROR: Code = Code::new("E016");
}

/// Writing token reports
pub mod output {
    use super::Code;

    pub const REPORT_WRITE_ERROR: Code = Code::new("E030");
    pub const REPORT_SERIALIZATION_ERROR: Code = Code::new("E031");
}

/// Info-level milestones
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const LEXER_READY: Code = Code::new("I021");
    pub const REPORT_WRITTEN: Code = Code::new("I030");
}

const fn row(
    code: Code,
    category: &'static str,
    severity: Severity,
    recoverable: bool,
    description: &'static str,
    action: &'static str,
) -> CodeInfo {
    CodeInfo {
        code,
        category,
        severity,
        recoverable,
        description,
        action,
    }
}

static REGISTRY: &[CodeInfo] = &[
    row(system::INTERNAL_ERROR, "System", Severity::Critical, false,
        "Critical internal system error",
        "File a bug report with the input that triggered it"),
    row(system::INITIALIZATION_FAILURE, "System", Severity::Critical, false,
        "System initialization failed",
        "Check logging and preference configuration"),
    row(file_processing::FILE_NOT_FOUND, "FileProcessing", Severity::High, true,
        "Source file not found",
        "Verify the path exists"),
    row(file_processing::NOT_A_FILE, "FileProcessing", Severity::High, true,
        "Path is not a regular file",
        "Pass a source file, not a directory or device"),
    row(file_processing::FILE_TOO_LARGE, "FileProcessing", Severity::High, true,
        "Source file exceeds the configured size limit",
        "Split the file or build with a larger max_file_size"),
    row(file_processing::PERMISSION_DENIED, "FileProcessing", Severity::High, true,
        "Permission denied reading source file",
        "Check file permissions"),
    row(file_processing::INVALID_ENCODING, "FileProcessing", Severity::High, true,
        "Source file is not valid UTF-8",
        "Re-encode the file as UTF-8"),
    row(file_processing::IO_ERROR, "FileProcessing", Severity::High, true,
        "I/O error while reading source file",
        "Retry; check the underlying storage"),
    row(config::PREFERENCES_READ_ERROR, "Configuration", Severity::Medium, true,
        "Preferences file could not be read",
        "Verify the --config path"),
    row(config::PREFERENCES_PARSE_ERROR, "Configuration", Severity::Medium, true,
        "Preferences file is not valid TOML for the expected schema",
        "Fix the reported key or remove it to use the default"),
    row(output::REPORT_WRITE_ERROR, "Output", Severity::High, true,
        "Token report could not be written",
        "Check that the results directory is writable"),
    row(output::REPORT_SERIALIZATION_ERROR, "Output", Severity::High, false,
        "Token report could not be serialized",
        "File a bug report"),
    row(success::SYSTEM_INITIALIZATION_COMPLETED, "System", Severity::Low, true,
        "Logging system initialized", "None"),
    row(success::FILE_PROCESSING_SUCCESS, "FileProcessing", Severity::Low, true,
        "Source file read successfully", "Continue to tokenization"),
    row(success::TOKENIZATION_COMPLETE, "Lexical", Severity::Low, true,
        "Tokenization completed", "None"),
    row(success::LEXER_READY, "Lexical", Severity::Low, true,
        "Lexer automaton constructed", "None"),
    row(success::REPORT_WRITTEN, "Output", Severity::Low, true,
        "Token report written", "None"),
];
