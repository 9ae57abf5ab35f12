//! Lexical analysis for C/C++ source text
//!
//! [`rules`] defines the token patterns and builds the composite automaton;
//! [`analyzer`] drives it over preprocessed text and emits token rows.

pub mod analyzer;
pub mod rules;

use crate::file_processor::FileProcessingResult;
use crate::tokens::TokenRow;

pub use analyzer::{classify, default_lexer, tokenize, Lexer, LexicalMetrics, Tokens};
pub use rules::{build_cpp_automaton, RuleLabel};

/// Tokenize a file that has already been read, logging under its path
pub fn tokenize_file_result(file_result: &FileProcessingResult) -> Vec<TokenRow> {
    tokenize_file_result_with_report(file_result).0
}

/// Tokenize a read file and return the run's counters as well
pub fn tokenize_file_result_with_report(
    file_result: &FileProcessingResult,
) -> (Vec<TokenRow>, LexicalMetrics) {
    default_lexer().tokenize_file_result(file_result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::process_file;
    use crate::logging::test_memory_logger;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_tokenize_file_result() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file_context_check.cpp");
        fs::write(&path, "return value;\n").unwrap();

        let memory = test_memory_logger();
        let file_result = process_file(&path).unwrap();
        let (rows, metrics) = tokenize_file_result_with_report(&file_result);

        assert_eq!(rows.len(), 3);
        assert_eq!(metrics.total_tokens(), 3);
        assert_eq!(tokenize_file_result(&file_result), rows);

        let expected = path.display().to_string();
        assert!(memory
            .events_with_code(crate::logging::codes::success::TOKENIZATION_COMPLETE)
            .iter()
            .any(|e| e.context.get("file") == Some(&expected)));
    }
}
