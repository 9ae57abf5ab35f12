//! Token model for C/C++ lexical analysis
//!
//! - [`TokenCategory`]: the seven output categories and their code bases
//! - [`TokenRow`]: one emitted token with code and 1-based position
//! - [`CodeTable`]: stable per-value codes for one run
//! - [`TokenCounts`]: per-category tallies

pub mod code_table;
pub mod token;

pub use code_table::CodeTable;
pub use token::{TokenCategory, TokenCounts, TokenRow};
