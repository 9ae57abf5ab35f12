//! Lexical rules for C/C++ source and the composite automaton built from them

use crate::automaton::{Automaton, AutomatonBuilder, CharClass, Fragment, LabeledRule};
use crate::grammar::punctuators;

/// Which rule produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleLabel {
    Whitespace,
    Number,
    Identifier,
    DoubleQuoted,
    SingleQuoted,
    Punctuation,
}

impl RuleLabel {
    /// Delimiting quote for the literal rules
    pub fn quote(self) -> Option<char> {
        match self {
            RuleLabel::DoubleQuoted => Some('"'),
            RuleLabel::SingleQuoted => Some('\''),
            _ => None,
        }
    }
}

/// Tie-break priorities; lower wins between equally long matches
pub mod priority {
    pub const LITERAL: u32 = 5;
    pub const WORD: u32 = 10;
    pub const PUNCTUATION: u32 = 20;
}

const DOUBLE_QUOTED_BODY_EXCLUDES: &[char] = &['"', '\\', '\r', '\n'];
const SINGLE_QUOTED_BODY_EXCLUDES: &[char] = &['\'', '\\', '\r', '\n'];

/// `\s+`
fn whitespace(b: &mut AutomatonBuilder<RuleLabel>) -> Fragment {
    let ws = b.char_atom(CharClass::Whitespace);
    b.plus(ws)
}

/// `[0-9]+`
fn number(b: &mut AutomatonBuilder<RuleLabel>) -> Fragment {
    let digit = b.char_atom(CharClass::AsciiDigit);
    b.plus(digit)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn identifier(b: &mut AutomatonBuilder<RuleLabel>) -> Fragment {
    let head = b.char_atom(CharClass::IdentStart);
    let tail = b.char_atom(CharClass::IdentContinue);
    let tail = b.kleene_star(tail);
    b.concatenate(head, tail)
}

/// `q ( \\ any | [^q\\\r\n] )* q`
fn quoted(b: &mut AutomatonBuilder<RuleLabel>, quote: char, body_excludes: &'static [char]) -> Fragment {
    let open = b.char_atom(CharClass::Exact(quote));

    let backslash = b.char_atom(CharClass::Exact('\\'));
    let escaped = b.char_atom(CharClass::Any);
    let escape = b.concatenate(backslash, escaped);
    let plain = b.char_atom(CharClass::NoneOf(body_excludes));
    let body = b.alternate(escape, plain);
    let body = b.kleene_star(body);

    let close = b.char_atom(CharClass::Exact(quote));
    let opened = b.concatenate(open, body);
    b.concatenate(opened, close)
}

/// One alternation over every punctuator spelling
fn punctuation(b: &mut AutomatonBuilder<RuleLabel>) -> Fragment {
    punctuators()
        .iter()
        .fold(None, |acc: Option<Fragment>, spelling| {
            let lit = b.literal(spelling);
            Some(match acc {
                Some(prev) => b.alternate(prev, lit),
                None => lit,
            })
        })
        .unwrap_or_else(|| b.empty())
}

/// The ordered rule list, each fragment still unlabeled
pub fn cpp_rules(b: &mut AutomatonBuilder<RuleLabel>) -> Vec<LabeledRule<RuleLabel>> {
    vec![
        LabeledRule::new(whitespace(b), RuleLabel::Whitespace, priority::WORD),
        LabeledRule::new(number(b), RuleLabel::Number, priority::WORD),
        LabeledRule::new(identifier(b), RuleLabel::Identifier, priority::WORD),
        LabeledRule::new(
            quoted(b, '"', DOUBLE_QUOTED_BODY_EXCLUDES),
            RuleLabel::DoubleQuoted,
            priority::LITERAL,
        ),
        LabeledRule::new(
            quoted(b, '\'', SINGLE_QUOTED_BODY_EXCLUDES),
            RuleLabel::SingleQuoted,
            priority::LITERAL,
        ),
        LabeledRule::new(punctuation(b), RuleLabel::Punctuation, priority::PUNCTUATION),
    ]
}

/// Build the composite C/C++ automaton
pub fn build_cpp_automaton() -> Automaton<RuleLabel> {
    let mut builder = AutomatonBuilder::new();
    let rules = cpp_rules(&mut builder);
    let root = builder.combine_alternation(rules);
    builder.build(root)
}
