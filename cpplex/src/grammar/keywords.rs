//! C++ reserved words (C++20 list)
//!
//! Matching is case-sensitive: `Return` is an identifier.
use std::collections::HashSet;
use std::sync::OnceLock;

/// The complete list of reserved words
pub fn reserved_keywords() -> &'static [&'static str] {
    &[
        // Alternative operator spellings
        "and",
        "and_eq",
        "bitand",
        "bitor",
        "compl",
        "not",
        "not_eq",
        "or",
        "or_eq",
        "xor",
        "xor_eq",
        // Types and type specifiers
        "auto",
        "bool",
        "char",
        "char8_t",
        "char16_t",
        "char32_t",
        "double",
        "float",
        "int",
        "long",
        "short",
        "signed",
        "unsigned",
        "void",
        "wchar_t",
        // Declarations and qualifiers
        "alignas",
        "alignof",
        "asm",
        "class",
        "concept",
        "const",
        "consteval",
        "constexpr",
        "constinit",
        "decltype",
        "enum",
        "explicit",
        "export",
        "extern",
        "friend",
        "inline",
        "mutable",
        "namespace",
        "noexcept",
        "operator",
        "private",
        "protected",
        "public",
        "register",
        "requires",
        "static",
        "static_assert",
        "struct",
        "template",
        "thread_local",
        "typedef",
        "typename",
        "union",
        "using",
        "virtual",
        "volatile",
        // Control flow
        "break",
        "case",
        "catch",
        "co_await",
        "co_return",
        "co_yield",
        "continue",
        "default",
        "do",
        "else",
        "for",
        "goto",
        "if",
        "return",
        "switch",
        "throw",
        "try",
        "while",
        // Expressions and literals
        "const_cast",
        "delete",
        "dynamic_cast",
        "false",
        "new",
        "nullptr",
        "reinterpret_cast",
        "sizeof",
        "static_cast",
        "this",
        "true",
        "typeid",
    ]
}

static KEYWORD_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Check if a string is a reserved word
pub fn is_reserved_keyword(s: &str) -> bool {
    KEYWORD_SET
        .get_or_init(|| reserved_keywords().iter().copied().collect())
        .contains(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        for word in ["return", "class", "co_await", "char8_t", "static_assert", "xor_eq"] {
            assert!(is_reserved_keyword(word), "{} should be reserved", word);
        }
        for word in ["Return", "main", "std", "string", "include", "define", ""] {
            assert!(!is_reserved_keyword(word), "{} should not be reserved", word);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let unique: HashSet<_> = reserved_keywords().iter().collect();
        assert_eq!(unique.len(), reserved_keywords().len());
        assert_eq!(reserved_keywords().len(), 92);
    }
}
