//! Lexical driver: walks the scanning view with the composite automaton and
//! turns matches into positioned, coded token rows.
//!
//! Matching happens on the preprocessed view, but every lexeme and position
//! is taken from the original text. The two are index-aligned, so a match
//! offset in one is the same character in the other.

use super::rules::{build_cpp_automaton, RuleLabel};
use crate::automaton::Automaton;
use crate::config::{LexicalPreferences, Preferences};
use crate::file_processor::FileProcessingResult;
use crate::grammar::{is_delimiter, is_reserved_keyword};
use crate::logging::codes;
use crate::position::LineIndex;
use crate::preprocess::Preprocessor;
use crate::tokens::{CodeTable, TokenCategory, TokenCounts, TokenRow};
use crate::{log_debug, log_success};
use std::sync::OnceLock;

/// Per-run counters reported alongside the token rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub counts: TokenCounts,
    /// Characters no rule matched
    pub skipped_characters: usize,
    /// Quoted literals whose original-text re-scan ended past the automaton match
    pub escape_extended_literals: usize,
    /// Quoted literals closed by end of text
    pub unterminated_literals: usize,
    /// Distinct lexemes across all categories
    pub distinct_values: usize,
}

impl LexicalMetrics {
    pub fn total_tokens(&self) -> usize {
        self.counts.total()
    }
}

/// C/C++ tokenizer.
///
/// Construction builds the composite automaton once; after that the lexer is
/// read-only and may be shared between threads.
#[derive(Debug)]
pub struct Lexer {
    automaton: Automaton<RuleLabel>,
    preprocessor: Preprocessor,
    preferences: LexicalPreferences,
}

impl Lexer {
    /// Lexer with every preprocessing step enabled; ignores `CPPLEX_*`
    /// variables so output depends on the input alone
    pub fn new() -> Self {
        let preferences = LexicalPreferences {
            log_skipped_characters: false,
            log_token_summary: true,
        };
        Self::assemble(Preprocessor::standard(), preferences)
    }

    /// Lexer configured from loaded preferences (environment or TOML)
    pub fn with_preferences(preferences: &Preferences) -> Self {
        Self::assemble(
            Preprocessor::from_preferences(&preferences.preprocess),
            preferences.lexical.clone(),
        )
    }

    fn assemble(preprocessor: Preprocessor, preferences: LexicalPreferences) -> Self {
        let automaton = build_cpp_automaton();

        log_success!(
            codes::success::LEXER_READY,
            "Lexer automaton constructed",
            "states" => automaton.state_count(),
            "preprocess_steps" => preprocessor.step_names().join(",")
        );

        Self {
            automaton,
            preprocessor,
            preferences,
        }
    }

    pub fn automaton(&self) -> &Automaton<RuleLabel> {
        &self.automaton
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Tokenize `source` into rows in source order
    pub fn tokenize(&self, source: &str) -> Vec<TokenRow> {
        self.tokenize_with_report(source).0
    }

    /// Tokenize and also return the run's counters
    pub fn tokenize_with_report(&self, source: &str) -> (Vec<TokenRow>, LexicalMetrics) {
        let mut tokens = self.tokens(source);
        let rows: Vec<TokenRow> = tokens.by_ref().collect();
        let metrics = tokens.into_metrics();

        if self.preferences.log_token_summary {
            log_success!(
                codes::success::TOKENIZATION_COMPLETE,
                "Tokenization complete",
                "tokens" => metrics.total_tokens(),
                "reserved_words" => metrics.counts.get(TokenCategory::ReservedWord),
                "identifiers" => metrics.counts.get(TokenCategory::Identifier),
                "delimiters" => metrics.counts.get(TokenCategory::Delimiter),
                "operators" => metrics.counts.get(TokenCategory::Operator),
                "numbers" => metrics.counts.get(TokenCategory::Number),
                "strings" => metrics.counts.get(TokenCategory::String),
                "characters" => metrics.counts.get(TokenCategory::Character),
                "distinct_values" => metrics.distinct_values,
                "skipped_characters" => metrics.skipped_characters,
                "unterminated_literals" => metrics.unterminated_literals
            );
        }

        (rows, metrics)
    }

    /// Tokenize a file that has already been read, logging under its path
    pub fn tokenize_file_result(
        &self,
        file_result: &FileProcessingResult,
    ) -> (Vec<TokenRow>, LexicalMetrics) {
        crate::logging::with_file_context(file_result.metadata.path.clone(), || {
            self.tokenize_with_report(&file_result.source)
        })
    }

    /// Lazy token iterator over `source`
    pub fn tokens(&self, source: &str) -> Tokens<'_> {
        let original: Vec<char> = source.chars().collect();
        let view = self.preprocessor.run(&original);
        let lines = LineIndex::new(&original);

        Tokens {
            lexer: self,
            original,
            view,
            lines,
            cursor: 0,
            codes: CodeTable::new(),
            metrics: LexicalMetrics::default(),
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator yielding one [`TokenRow`] per emitted token
#[derive(Debug)]
pub struct Tokens<'a> {
    lexer: &'a Lexer,
    original: Vec<char>,
    view: Vec<char>,
    lines: LineIndex,
    cursor: usize,
    codes: CodeTable,
    metrics: LexicalMetrics,
}

impl Tokens<'_> {
    /// Counters for everything consumed so far
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn into_metrics(self) -> LexicalMetrics {
        self.metrics
    }

    fn skip_unmatched(&mut self) {
        self.metrics.skipped_characters += 1;
        if self.lexer.preferences.log_skipped_characters {
            let ch = self.original[self.cursor];
            log_debug!("Skipped unmatched character",
                position = self.lines.position(self.cursor),
                "char" => ch.escape_debug()
            );
        }
        self.cursor += 1;
    }

    /// End of a quoted literal starting at `start`, re-scanned in the original text
    fn literal_end(&mut self, start: usize, quote: char, matched_end: usize) -> usize {
        let (end, terminated) = scan_literal(&self.original, start, quote);

        if !terminated {
            self.metrics.unterminated_literals += 1;
            log_debug!("Quoted literal closed by end of text",
                position = self.lines.position(start),
                "quote" => quote
            );
        }
        if end > matched_end {
            self.metrics.escape_extended_literals += 1;
        }
        end
    }
}

impl Iterator for Tokens<'_> {
    type Item = TokenRow;

    fn next(&mut self) -> Option<TokenRow> {
        while self.cursor < self.view.len() {
            let start = self.cursor;

            let matched = match self.lexer.automaton.match_longest(&self.view, start) {
                Some(m) if m.length > 0 => m,
                _ => {
                    self.skip_unmatched();
                    continue;
                }
            };

            let mut end = start + matched.length;
            if let Some(quote) = matched.label.quote() {
                end = self.literal_end(start, quote, end);
            }
            self.cursor = end;

            let lexeme: String = self.original[start..end].iter().collect();
            let Some(category) = classify(matched.label, &lexeme) else {
                continue;
            };

            let code = self.codes.code_for(category, &lexeme);
            self.metrics.counts.record(category);
            self.metrics.distinct_values = self.codes.distinct_total();

            let position = self.lines.position(start);
            return Some(TokenRow {
                category,
                code,
                lexeme,
                line: position.line,
                column: position.column,
            });
        }
        None
    }
}

/// Token category for a rule match; `None` for whitespace
pub fn classify(label: RuleLabel, lexeme: &str) -> Option<TokenCategory> {
    let category = match label {
        RuleLabel::Whitespace => return None,
        RuleLabel::Number => TokenCategory::Number,
        RuleLabel::Identifier if is_reserved_keyword(lexeme) => TokenCategory::ReservedWord,
        RuleLabel::Identifier => TokenCategory::Identifier,
        RuleLabel::DoubleQuoted => TokenCategory::String,
        RuleLabel::SingleQuoted => TokenCategory::Character,
        RuleLabel::Punctuation if is_delimiter(lexeme) => TokenCategory::Delimiter,
        RuleLabel::Punctuation => TokenCategory::Operator,
    };
    Some(category)
}

/// Scan a quoted literal opening at `start`.
///
/// A backslash consumes itself and the next character unconditionally.
/// Returns the end offset (clamped to the text length) and whether a closing
/// quote was found.
fn scan_literal(text: &[char], start: usize, quote: char) -> (usize, bool) {
    let mut i = start + 1;
    while i < text.len() {
        match text[i] {
            '\\' => i += 2,
            c if c == quote => return (i + 1, true),
            _ => i += 1,
        }
    }
    (text.len(), false)
}

static DEFAULT_LEXER: OnceLock<Lexer> = OnceLock::new();

/// Process-wide lexer, built on first use
pub fn default_lexer() -> &'static Lexer {
    DEFAULT_LEXER.get_or_init(Lexer::new)
}

/// Tokenize `source` with the process-wide lexer
pub fn tokenize(source: &str) -> Vec<TokenRow> {
    default_lexer().tokenize(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LexicalPreferences, PreprocessPreferences};
    use crate::logging::test_memory_logger;

    fn lexemes(rows: &[TokenRow]) -> Vec<&str> {
        rows.iter().map(|r| r.lexeme.as_str()).collect()
    }

    #[test]
    fn test_simple_statement() {
        let rows = tokenize("int x = 42;");

        assert_eq!(lexemes(&rows), ["int", "x", "=", "42", ";"]);
        assert_eq!(
            rows.iter().map(|r| r.category).collect::<Vec<_>>(),
            [
                TokenCategory::ReservedWord,
                TokenCategory::Identifier,
                TokenCategory::Operator,
                TokenCategory::Number,
                TokenCategory::Delimiter,
            ]
        );
        assert_eq!(
            rows.iter().map(|r| r.code).collect::<Vec<_>>(),
            [101, 201, 401, 501, 301]
        );
    }

    #[test]
    fn test_codes_are_stable_per_value() {
        let rows = tokenize("a b a c b");
        assert_eq!(
            rows.iter().map(|r| r.code).collect::<Vec<_>>(),
            [201, 202, 201, 203, 202]
        );
    }

    #[test]
    fn test_positions_come_from_original_text() {
        let rows = tokenize("int\n  x;\n\ty");
        let positions: Vec<(usize, usize)> = rows.iter().map(|r| (r.line, r.column)).collect();
        assert_eq!(positions, [(1, 1), (2, 3), (2, 4), (3, 2)]);
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let lexer = Lexer::new();
        let (rows, metrics) = lexer.tokenize_with_report("a @ $b");

        assert_eq!(lexemes(&rows), ["a", "b"]);
        assert_eq!(metrics.skipped_characters, 2);
        assert_eq!(metrics.total_tokens(), 2);
    }

    #[test]
    fn test_unterminated_literal_runs_to_end_of_text() {
        let text: Vec<char> = "\"abc".chars().collect();
        assert_eq!(scan_literal(&text, 0, '"'), (4, false));

        // A trailing backslash would step past the end; the result is clamped.
        let text: Vec<char> = "'\\".chars().collect();
        assert_eq!(scan_literal(&text, 0, '\''), (2, false));
    }

    #[test]
    fn test_scan_literal_continues_across_line_breaks() {
        let text: Vec<char> = "\"ab\ncd\" x".chars().collect();
        assert_eq!(scan_literal(&text, 0, '"'), (7, true));
    }

    #[test]
    fn test_scan_literal_escapes() {
        let text: Vec<char> = r#""a\"b" c"#.chars().collect();
        assert_eq!(scan_literal(&text, 0, '"'), (6, true));

        let text: Vec<char> = r"'\\' x".chars().collect();
        assert_eq!(scan_literal(&text, 0, '\''), (4, true));
    }

    #[test]
    fn test_literal_lexeme_keeps_comment_markers() {
        let rows = tokenize(r#"s = "/* not a comment */";"#);
        assert_eq!(lexemes(&rows), ["s", "=", r#""/* not a comment */""#, ";"]);
        assert_eq!(rows[2].category, TokenCategory::String);
    }

    #[test]
    fn test_character_literals() {
        let rows = tokenize(r"c = '\n';");
        assert_eq!(rows[2].lexeme, r"'\n'");
        assert_eq!(rows[2].category, TokenCategory::Character);
        assert_eq!(rows[2].code, 701);
    }

    #[test]
    fn test_disabled_comment_stripping() {
        let preferences = Preferences {
            preprocess: PreprocessPreferences {
                strip_bom: true,
                splice_lines: true,
                strip_comments: false,
            },
            lexical: LexicalPreferences {
                log_skipped_characters: false,
                log_token_summary: false,
            },
            ..Preferences::default()
        };
        let lexer = Lexer::with_preferences(&preferences);

        let rows = lexer.tokenize("x // y");
        assert_eq!(lexemes(&rows), ["x", "/", "/", "y"]);
    }

    #[test]
    fn test_iterator_matches_materialized_rows() {
        let lexer = Lexer::new();
        let source = "for (int i = 0; i < n; ++i) { sum += v[i]; }";

        let lazy: Vec<TokenRow> = lexer.tokens(source).collect();
        assert_eq!(lazy, lexer.tokenize(source));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(RuleLabel::Whitespace, " "), None);
        assert_eq!(classify(RuleLabel::Identifier, "while"), Some(TokenCategory::ReservedWord));
        assert_eq!(classify(RuleLabel::Identifier, "While"), Some(TokenCategory::Identifier));
        assert_eq!(classify(RuleLabel::Punctuation, "["), Some(TokenCategory::Delimiter));
        assert_eq!(classify(RuleLabel::Punctuation, "::"), Some(TokenCategory::Operator));
    }

    #[test]
    fn test_summary_and_skip_events_are_logged() {
        let memory = test_memory_logger();
        let preferences = Preferences {
            lexical: LexicalPreferences {
                log_skipped_characters: true,
                log_token_summary: true,
            },
            ..Preferences::default()
        };
        let lexer = Lexer::with_preferences(&preferences);
        lexer.tokenize("skip_check `");

        let events = memory.events();
        assert!(events
            .iter()
            .any(|e| e.code == codes::success::TOKENIZATION_COMPLETE));
        assert!(events.iter().any(|e| e.is_debug()
            && e.context.get("char").map(String::as_str) == Some("`")
            && e.position.map(|p| p.column) == Some(12)));
    }
}
