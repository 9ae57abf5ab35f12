//! NFA state representation
//!
//! States live in an arena (`Vec<NfaState<L>>`) and refer to each other by
//! [`StateId`]. A state is either plain or accepting; only accepting states
//! carry a rule label and a tie-break priority.

use std::fmt;

/// Index of a state inside the automaton arena
pub type StateId = usize;

/// Character predicate guarding a consuming transition
#[derive(Clone, Copy)]
pub enum CharClass {
    /// Exactly this character
    Exact(char),
    /// Inclusive character range
    Range(char, char),
    /// Any character at all
    Any,
    /// Unicode whitespace
    Whitespace,
    /// `0-9`
    AsciiDigit,
    /// `A-Z`, `a-z` or `_`
    IdentStart,
    /// `A-Z`, `a-z`, `0-9` or `_`
    IdentContinue,
    /// Any character not listed
    NoneOf(&'static [char]),
    /// Arbitrary predicate
    Custom(fn(char) -> bool),
}

impl CharClass {
    /// Check whether `ch` satisfies this predicate
    pub fn matches(&self, ch: char) -> bool {
        match *self {
            CharClass::Exact(expected) => ch == expected,
            CharClass::Range(lo, hi) => lo <= ch && ch <= hi,
            CharClass::Any => true,
            CharClass::Whitespace => ch.is_whitespace(),
            CharClass::AsciiDigit => ch.is_ascii_digit(),
            CharClass::IdentStart => ch.is_ascii_alphabetic() || ch == '_',
            CharClass::IdentContinue => ch.is_ascii_alphanumeric() || ch == '_',
            CharClass::NoneOf(excluded) => !excluded.contains(&ch),
            CharClass::Custom(predicate) => predicate(ch),
        }
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Exact(ch) => write!(f, "{:?}", ch),
            CharClass::Range(lo, hi) => write!(f, "[{:?}-{:?}]", lo, hi),
            CharClass::Any => write!(f, "ANY"),
            CharClass::Whitespace => write!(f, "\\s"),
            CharClass::AsciiDigit => write!(f, "[0-9]"),
            CharClass::IdentStart => write!(f, "[A-Za-z_]"),
            CharClass::IdentContinue => write!(f, "[A-Za-z0-9_]"),
            CharClass::NoneOf(excluded) => write!(f, "[^{:?}]", excluded),
            CharClass::Custom(_) => write!(f, "<custom>"),
        }
    }
}

/// Consuming transition: predicate plus destination
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub class: CharClass,
    pub target: StateId,
}

/// Whether a state accepts, and for which rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateKind<L> {
    Plain,
    Accepting { label: L, priority: u32 },
}

impl<L> StateKind<L> {
    pub fn is_accepting(&self) -> bool {
        matches!(self, StateKind::Accepting { .. })
    }
}

/// A single NFA state
#[derive(Debug, Clone)]
pub struct NfaState<L> {
    /// Successors reachable without consuming input
    pub epsilon: Vec<StateId>,
    /// Successors reachable by consuming one matching character, in insertion order
    pub transitions: Vec<Transition>,
    pub kind: StateKind<L>,
}

impl<L> NfaState<L> {
    /// Create a plain state with no edges
    pub fn new() -> Self {
        Self {
            epsilon: Vec::new(),
            transitions: Vec::new(),
            kind: StateKind::Plain,
        }
    }
}

impl<L> Default for NfaState<L> {
    fn default() -> Self {
        Self::new()
    }
}
