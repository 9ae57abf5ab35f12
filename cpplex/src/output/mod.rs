//! Token report rendering and writing
//!
//! Three renderings of a token sequence: the plain text listing printed by
//! the CLI, pretty JSON, and fully quoted CSV. Reports are written to
//! `<results_dir>/<file stem>.tokens.<ext>`.

use crate::config::compile_time::output::DEFAULT_RESULTS_DIR;
use crate::logging::codes;
use crate::tokens::TokenRow;
use crate::{log_error, log_success};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Report writing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write report {path}: {message}")]
    Write { path: String, message: String },

    #[error("Failed to serialize tokens: {message}")]
    Serialization { message: String },
}

impl OutputError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            OutputError::Write { .. } => codes::output::REPORT_WRITE_ERROR,
            OutputError::Serialization { .. } => codes::output::REPORT_SERIALIZATION_ERROR,
        }
    }
}

const HEADER: [&str; 5] = ["category", "code", "lexeme", "line", "column"];

/// Render `rows` in the requested format
pub fn render(rows: &[TokenRow], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(render_text(rows)),
        OutputFormat::Json => render_json(rows),
        OutputFormat::Csv => Ok(render_csv(rows)),
    }
}

/// Header line followed by one `cat, code, lexeme, line, column` line per row
pub fn render_text(rows: &[TokenRow]) -> String {
    let mut out = HEADER.join(", ");
    out.push('\n');
    for row in rows {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", row);
    }
    out
}

pub fn render_json(rows: &[TokenRow]) -> Result<String, OutputError> {
    serde_json::to_string_pretty(rows).map_err(|e| OutputError::Serialization {
        message: e.to_string(),
    })
}

/// Every field double-quoted with embedded quotes doubled; rows joined by `\n`
pub fn render_csv(rows: &[TokenRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(csv_line(HEADER.iter().map(|h| h.to_string())));
    for row in rows {
        lines.push(csv_line([
            row.category.to_string(),
            row.code.to_string(),
            row.lexeme.clone(),
            row.line.to_string(),
            row.column.to_string(),
        ]));
    }
    lines.join("\n")
}

fn csv_line(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Path a report for `source_path` lands at
pub fn report_path(source_path: &Path, format: OutputFormat, results_dir: &Path) -> PathBuf {
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tokens".to_string());
    results_dir.join(format!("{}.tokens.{}", stem, format.extension()))
}

/// Results directory used when none is given
pub fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_DIR)
}

/// Render and write a report, creating `results_dir` if needed
pub fn write_report(
    rows: &[TokenRow],
    format: OutputFormat,
    source_path: &Path,
    results_dir: &Path,
) -> Result<PathBuf, OutputError> {
    let out_path = report_path(source_path, format, results_dir);
    let content = render(rows, format).inspect_err(|error| {
        log_error!(error.error_code(), "Token report serialization failed",
            "reason" => error);
    })?;

    fs::create_dir_all(results_dir)
        .and_then(|()| fs::write(&out_path, content))
        .map_err(|e| {
            let error = OutputError::Write {
                path: out_path.display().to_string(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Token report could not be written",
                "path" => out_path.display(),
                "io_error" => e);
            error
        })?;

    log_success!(
        codes::success::REPORT_WRITTEN,
        "Token report written",
        "path" => out_path.display(),
        "format" => format.extension(),
        "tokens" => rows.len()
    );
    Ok(out_path)
}
