//! C++ punctuators and operators
//!
//! The lexer builds one literal automaton per entry; maximal munch picks the
//! longest spelling, so list order carries no meaning.

/// Every punctuator and operator spelling
pub fn punctuators() -> &'static [&'static str] {
    &[
        // Three characters
        "...", "->*", "<<=", ">>=",
        // Two characters
        "::", "->", ".*", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|=", "==", "!=", "<=", ">=",
        "&&", "||", "++", "--", "<<", ">>", "##",
        // One character
        "+", "-", "*", "/", "%", "^", "&", "|", "~", "!", "=", "<", ">", "?", ":", ".", ",", ";",
        "(", ")", "[", "]", "{", "}",
    ]
}

/// Punctuators that group or separate rather than operate
pub const DELIMITERS: &[&str] = &["(", ")", "{", "}", ";", ",", "[", "]"];

pub fn is_delimiter(s: &str) -> bool {
    DELIMITERS.contains(&s)
}

pub fn is_punctuator(s: &str) -> bool {
    punctuators().contains(&s)
}
