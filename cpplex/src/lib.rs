//! Thompson-NFA tokenizer for C/C++ source text
//!
//! ```
//! let rows = cpplex::tokenize("return value;");
//! assert_eq!(rows[0].lexeme, "return");
//! assert_eq!(rows[0].category, cpplex::TokenCategory::ReservedWord);
//! ```

// Internal modules
pub mod automaton;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod output;
pub mod position;
pub mod preprocess;
pub mod tokens;

// Re-export key types for library consumers
pub use config::Preferences;
pub use lexical::{tokenize, Lexer, LexicalMetrics};
pub use output::{OutputError, OutputFormat};
pub use position::Position;
pub use tokens::{TokenCategory, TokenRow};
