//! Individual length-preserving transforms
//!
//! Every step rewrites characters in place and only ever replaces with
//! `' '`, so offsets in the result line up with the original text.
use super::PreprocessStep;

/// Replaces a leading U+FEFF with a space
#[derive(Debug, Clone, Copy, Default)]
pub struct StripBom;

impl PreprocessStep for StripBom {
    fn name(&self) -> &'static str {
        "strip-bom"
    }

    fn apply(&self, text: &mut [char]) {
        if let Some(first) = text.first_mut() {
            if *first == '\u{FEFF}' {
                *first = ' ';
            }
        }
    }
}

/// Blanks backslash-newline continuations (`\` followed by `\r\n`, `\n` or `\r`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceLines;

impl PreprocessStep for SpliceLines {
    fn name(&self) -> &'static str {
        "splice-lines"
    }

    fn apply(&self, text: &mut [char]) {
        let mut i = 0;
        while i < text.len() {
            if text[i] != '\\' {
                i += 1;
                continue;
            }
            let width = match (text.get(i + 1), text.get(i + 2)) {
                (Some('\r'), Some('\n')) => 3,
                (Some('\n'), _) | (Some('\r'), _) => 2,
                _ => 1,
            };
            if width > 1 {
                blank(&mut text[i..i + width]);
            }
            i += width;
        }
    }
}

/// Blanks `// ...` and `/* ... */` comments.
///
/// Quoted literals are stepped over, so comment markers inside `"..."` or
/// `'...'` survive. A literal with no closing quote ends at the line break.
/// A `/*` with no closing `*/` is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankComments;

impl PreprocessStep for BlankComments {
    fn name(&self) -> &'static str {
        "blank-comments"
    }

    fn apply(&self, text: &mut [char]) {
        let len = text.len();
        let mut i = 0;
        while i < len {
            match (text[i], text.get(i + 1).copied()) {
                ('\'', _) if !opens_char_literal(text, i) => i += 1,
                (quote @ ('"' | '\''), _) => {
                    i = skip_literal(text, i, quote);
                }
                ('/', Some('/')) => {
                    let end = text[i..]
                        .iter()
                        .position(|&c| c == '\n' || c == '\r')
                        .map_or(len, |n| i + n);
                    blank(&mut text[i..end]);
                    i = end;
                }
                ('/', Some('*')) => match find_block_end(text, i + 2) {
                    Some(end) => {
                        blank(&mut text[i..end]);
                        i = end;
                    }
                    None => i += 1,
                },
                _ => i += 1,
            }
        }
    }
}

/// Whether the `'` at `at` starts a character literal.
///
/// After an identifier or digit it is a digit separator (`1'000`) or stray
/// apostrophe, unless the word before it is an encoding prefix (`L'x'`).
fn opens_char_literal(text: &[char], at: usize) -> bool {
    let word_start = text[..at]
        .iter()
        .rposition(|&c| !is_word_char(c))
        .map_or(0, |n| n + 1);
    let word = &text[word_start..at];
    match word {
        [] => true,
        ['L'] | ['u'] | ['U'] | ['u', '8'] => true,
        _ => false,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Index just past the literal opened by `quote` at `start`
fn skip_literal(text: &[char], start: usize, quote: char) -> usize {
    let mut j = start + 1;
    while j < text.len() {
        match text[j] {
            '\\' => j += 2,
            '\n' | '\r' => return j,
            c if c == quote => return j + 1,
            _ => j += 1,
        }
    }
    text.len()
}

/// Index just past the `*/` closing a block comment whose body starts at `from`
fn find_block_end(text: &[char], from: usize) -> Option<usize> {
    text.get(from..)?
        .windows(2)
        .position(|w| w == ['*', '/'])
        .map(|n| from + n + 2)
}

fn blank(span: &mut [char]) {
    span.fill(' ');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(step: &dyn PreprocessStep, input: &str) -> String {
        let mut chars: Vec<char> = input.chars().collect();
        step.apply(&mut chars);
        chars.into_iter().collect()
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(run(&StripBom, "\u{FEFF}int"), " int");
        assert_eq!(run(&StripBom, "int\u{FEFF}"), "int\u{FEFF}");
        assert_eq!(run(&StripBom, ""), "");
    }

    #[test]
    fn test_splice_lines() {
        assert_eq!(run(&SpliceLines, "int\\\nx;"), "int  x;");
        assert_eq!(run(&SpliceLines, "a\\\r\nb"), "a   b");
        assert_eq!(run(&SpliceLines, "a\\\rb"), "a  b");
        assert_eq!(run(&SpliceLines, "\"a\\\\\" b"), "\"a\\\\\" b");
        assert_eq!(run(&SpliceLines, "end\\"), "end\\");
    }

    #[test]
    fn test_line_comments() {
        assert_eq!(run(&BlankComments, "x; // note\ny;"), "x;        \ny;");
        assert_eq!(run(&BlankComments, "x; // note\r\ny;"), "x;        \r\ny;");
        assert_eq!(run(&BlankComments, "// only"), "       ");
    }

    #[test]
    fn test_block_comments() {
        assert_eq!(run(&BlankComments, "a/* b\n c */d"), "a          d");
        assert_eq!(run(&BlankComments, "a/**/b"), "a    b");
        assert_eq!(run(&BlankComments, "a/*/b*/c"), "a      c");
    }

    #[test]
    fn test_unterminated_block_comment_is_kept() {
        assert_eq!(run(&BlankComments, "a /* open"), "a /* open");
        assert_eq!(run(&BlankComments, "a /* open // tail"), "a /* open        ");
    }

    #[test]
    fn test_markers_inside_literals_survive() {
        let input = "s = \"http://x /* y */\"; // gone";
        assert_eq!(
            run(&BlankComments, input),
            "s = \"http://x /* y */\";        "
        );
        assert_eq!(run(&BlankComments, "c = '/'; /**/"), "c = '/';     ");
        assert_eq!(
            run(&BlankComments, "\"a\\\"//b\" //c"),
            "\"a\\\"//b\"    "
        );
    }

    #[test]
    fn test_scope_resolution_before_comment() {
        assert_eq!(run(&BlankComments, "std:://x"), "std::   ");
    }

    #[test]
    fn test_unterminated_literal_stops_at_line_end() {
        assert_eq!(run(&BlankComments, "'a\n// c"), "'a\n    ");
    }

    #[test]
    fn test_apostrophe_after_word_does_not_open_literal() {
        assert_eq!(
            run(&BlankComments, "x = 1'000; // don't"),
            "x = 1'000;         "
        );
        assert_eq!(run(&BlankComments, "it's // a'b"), "it's       ");
    }

    #[test]
    fn test_encoding_prefixed_char_literal() {
        assert_eq!(run(&BlankComments, "c = L'/'; //x"), "c = L'/';    ");
        assert_eq!(run(&BlankComments, "c = u8'/'; //x"), "c = u8'/';    ");
        assert!(opens_char_literal(&['(', '\''], 1));
        assert!(!opens_char_literal(&['x', 'L', '\''], 2));
    }
}
