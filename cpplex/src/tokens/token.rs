//! Token categories and emitted token rows
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of an emitted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    ReservedWord,
    Identifier,
    Delimiter,
    Operator,
    Number,
    String,
    Character,
}

impl TokenCategory {
    /// Every category, in code-base order
    pub const ALL: [TokenCategory; 7] = [
        TokenCategory::ReservedWord,
        TokenCategory::Identifier,
        TokenCategory::Delimiter,
        TokenCategory::Operator,
        TokenCategory::Number,
        TokenCategory::String,
        TokenCategory::Character,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TokenCategory::ReservedWord => "reserved-word",
            TokenCategory::Identifier => "identifier",
            TokenCategory::Delimiter => "delimiter",
            TokenCategory::Operator => "operator",
            TokenCategory::Number => "number",
            TokenCategory::String => "string",
            TokenCategory::Character => "character",
        }
    }

    /// First code handed out in this category
    pub const fn base_code(self) -> u32 {
        match self {
            TokenCategory::ReservedWord => 101,
            TokenCategory::Identifier => 201,
            TokenCategory::Delimiter => 301,
            TokenCategory::Operator => 401,
            TokenCategory::Number => 501,
            TokenCategory::String => 601,
            TokenCategory::Character => 701,
        }
    }

    /// Dense index into per-category tables
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted token.
///
/// `lexeme` is sliced from the original text, so it keeps comments-inside-
/// literals, escapes and spliced newlines exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRow {
    pub category: TokenCategory,
    pub code: u32,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for TokenRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.category, self.code, self.lexeme, self.line, self.column
        )
    }
}

/// Number of tokens emitted per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    counts: [usize; 7],
}

impl TokenCounts {
    pub fn record(&mut self, category: TokenCategory) {
        self.counts[category.index()] += 1;
    }

    pub fn get(&self, category: TokenCategory) -> usize {
        self.counts[category.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(category, count)` pairs in code-base order, including zeros
    pub fn iter(&self) -> impl Iterator<Item = (TokenCategory, usize)> + '_ {
        TokenCategory::ALL.iter().map(|&c| (c, self.get(c)))
    }
}
