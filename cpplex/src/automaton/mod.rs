//! Nondeterministic finite automaton engine
//!
//! - [`builder`]: Thompson construction primitives over a state arena
//! - [`compose`]: labeling rule fragments and alternating them together
//! - [`simulate`]: longest-match simulation with priority tie-breaks

pub mod builder;
pub mod compose;
pub mod simulate;
pub mod state;

pub use builder::{AutomatonBuilder, Fragment};
pub use compose::LabeledRule;
pub use simulate::{Automaton, MatchResult};
pub use state::{CharClass, NfaState, StateId, StateKind, Transition};
