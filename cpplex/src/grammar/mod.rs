//! Fixed C++ lexical tables: reserved words, punctuators, delimiters

pub mod keywords;
pub mod punctuators;

pub use keywords::{is_reserved_keyword, reserved_keywords};
pub use punctuators::{is_delimiter, is_punctuator, punctuators, DELIMITERS};
