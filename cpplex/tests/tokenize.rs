use cpplex::{tokenize, Lexer, TokenCategory, TokenRow};
use std::sync::Arc;
use std::thread;

fn summary(rows: &[TokenRow]) -> Vec<(TokenCategory, &str, usize, usize)> {
    rows.iter()
        .map(|r| (r.category, r.lexeme.as_str(), r.line, r.column))
        .collect()
}

#[test]
fn escaped_quote_stays_inside_one_string() {
    let rows = tokenize(r#""a\"b""#);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, TokenCategory::String);
    assert_eq!(rows[0].lexeme, r#""a\"b""#);
    assert_eq!(rows[0].code, 601);
}

#[test]
fn keyword_versus_identifier() {
    let rows = tokenize("return value;");

    assert_eq!(
        summary(&rows),
        [
            (TokenCategory::ReservedWord, "return", 1, 1),
            (TokenCategory::Identifier, "value", 1, 8),
            (TokenCategory::Delimiter, ";", 1, 13),
        ]
    );
}

#[test]
fn comments_are_transparent() {
    let with_comments = tokenize("int /* block */ x; // trailing\ny = 1;");
    let without = tokenize("int             x;            \ny = 1;");

    assert_eq!(with_comments, without);
}

#[test]
fn apostrophe_in_comment_after_digit_separator_stays_hidden() {
    let rows = tokenize("x = 1'000; // don't");

    assert_eq!(
        summary(&rows),
        [
            (TokenCategory::Identifier, "x", 1, 1),
            (TokenCategory::Operator, "=", 1, 3),
            (TokenCategory::Number, "1", 1, 5),
            (TokenCategory::Number, "000", 1, 7),
            (TokenCategory::Delimiter, ";", 1, 10),
        ]
    );
}

#[test]
fn multi_line_block_comment_keeps_line_numbers() {
    let rows = tokenize("a /* one\ntwo\nthree */ b");

    assert_eq!(
        summary(&rows),
        [
            (TokenCategory::Identifier, "a", 1, 1),
            (TokenCategory::Identifier, "b", 3, 10),
        ]
    );
}

#[test]
fn line_splice_joins_lines_but_keeps_original_positions() {
    let rows = tokenize("int\\\nx;");

    assert_eq!(
        summary(&rows),
        [
            (TokenCategory::ReservedWord, "int", 1, 1),
            (TokenCategory::Identifier, "x", 2, 1),
            (TokenCategory::Delimiter, ";", 2, 2),
        ]
    );
}

#[test]
fn empty_and_whitespace_only_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \t\r\n\n   ").is_empty());
    assert!(tokenize("// only a comment").is_empty());
}

#[test]
fn codes_start_at_category_bases_and_repeat_for_same_value() {
    let rows = tokenize("if (a == b) { a = \"s\"; c = 'x'; return 10; } if");

    let codes: Vec<(&str, u32)> = rows.iter().map(|r| (r.lexeme.as_str(), r.code)).collect();
    assert_eq!(
        codes,
        [
            ("if", 101),
            ("(", 301),
            ("a", 201),
            ("==", 401),
            ("b", 202),
            (")", 302),
            ("{", 303),
            ("a", 201),
            ("=", 402),
            ("\"s\"", 601),
            (";", 304),
            ("c", 203),
            ("=", 402),
            ("'x'", 701),
            (";", 304),
            ("return", 102),
            ("10", 501),
            (";", 304),
            ("}", 305),
            ("if", 101),
        ]
    );
}

#[test]
fn maximal_munch_on_operators() {
    let rows = tokenize("a<<=b->*c...d");
    let lexemes: Vec<&str> = rows.iter().map(|r| r.lexeme.as_str()).collect();

    assert_eq!(lexemes, ["a", "<<=", "b", "->*", "c", "...", "d"]);
    assert!(rows
        .iter()
        .filter(|r| r.lexeme.len() == 3)
        .all(|r| r.category == TokenCategory::Operator));
}

#[test]
fn unknown_characters_are_skipped() {
    let rows = tokenize("#include <x>\n@y");
    let lexemes: Vec<&str> = rows.iter().map(|r| r.lexeme.as_str()).collect();

    assert_eq!(lexemes, ["include", "<", "x", ">", "y"]);
}

#[test]
fn columns_count_characters_not_bytes() {
    let rows = tokenize("é = \"ü\"; z");

    assert_eq!(
        summary(&rows),
        [
            (TokenCategory::Operator, "=", 1, 3),
            (TokenCategory::String, "\"ü\"", 1, 5),
            (TokenCategory::Delimiter, ";", 1, 8),
            (TokenCategory::Identifier, "z", 1, 10),
        ]
    );
}

#[test]
fn byte_order_mark_is_ignored() {
    let rows = tokenize("\u{feff}int x;");

    assert_eq!(rows[0].lexeme, "int");
    assert_eq!((rows[0].line, rows[0].column), (1, 2));
}

#[test]
fn tokenization_is_deterministic() {
    let source = "int main() { return a->b + 'c' - \"d\"; }";
    assert_eq!(tokenize(source), tokenize(source));
}

#[test]
fn shared_lexer_across_threads() {
    let lexer = Arc::new(Lexer::new());
    let source = "for (int i = 0; i < 10; ++i) { total += i; }";
    let expected = lexer.tokenize(source);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lexer = Arc::clone(&lexer);
            thread::spawn(move || lexer.tokenize(source))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
