//! Thompson construction over a state arena
//!
//! Every primitive appends fresh states to the builder's arena and returns a
//! [`Fragment`] naming its start and accept states. Combinators take their
//! operands by value and thread new epsilon edges into the operands' existing
//! states, so a fragment can be used as an operand at most once. Reusing a
//! sub-pattern requires an explicit [`AutomatonBuilder::deep_copy`].

use super::simulate::Automaton;
use super::state::{CharClass, NfaState, StateId, Transition};
use crate::log_debug;

/// A sub-automaton inside the builder arena: one entry state plus its accepts.
///
/// Deliberately neither `Clone` nor `Copy`.
#[derive(Debug)]
#[must_use]
pub struct Fragment {
    start: StateId,
    accepts: Vec<StateId>,
}

impl Fragment {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepts(&self) -> &[StateId] {
        &self.accepts
    }
}

/// Owns the state arena while an automaton is being assembled
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<L> {
    states: Vec<NfaState<L>>,
}

impl<L: Clone> AutomatonBuilder<L> {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Number of states appended so far
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(NfaState::new());
        id
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].epsilon.push(to);
    }

    fn add_transition(&mut self, from: StateId, class: CharClass, to: StateId) {
        self.states[from]
            .transitions
            .push(Transition { class, target: to });
    }

    pub(crate) fn state_mut(&mut self, id: StateId) -> &mut NfaState<L> {
        &mut self.states[id]
    }

    /// Automaton accepting only the empty string
    pub fn empty(&mut self) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, accept);
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    /// Automaton consuming exactly one character that satisfies `class`
    pub fn char_atom(&mut self, class: CharClass) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_transition(start, class, accept);
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    /// Automaton matching `text` exactly; empty text accepts the empty string
    pub fn literal(&mut self, text: &str) -> Fragment {
        let mut fragment = self.empty();
        for ch in text.chars() {
            let atom = self.char_atom(CharClass::Exact(ch));
            fragment = self.concatenate(fragment, atom);
        }
        fragment
    }

    /// L(a)L(b)
    pub fn concatenate(&mut self, a: Fragment, b: Fragment) -> Fragment {
        for &accept in &a.accepts {
            self.add_epsilon(accept, b.start);
        }
        Fragment {
            start: a.start,
            accepts: b.accepts,
        }
    }

    /// L(a) | L(b), converging on one new shared accept state
    pub fn alternate(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, a.start);
        self.add_epsilon(start, b.start);
        for &old in a.accepts.iter().chain(b.accepts.iter()) {
            self.add_epsilon(old, accept);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    /// Zero or more repetitions of `a`
    pub fn kleene_star(&mut self, a: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_epsilon(start, a.start);
        self.add_epsilon(start, accept);
        for &old in &a.accepts {
            self.add_epsilon(old, a.start);
            self.add_epsilon(old, accept);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    /// One or more repetitions of `a`
    pub fn plus(&mut self, a: Fragment) -> Fragment {
        let tail = self.deep_copy(&a);
        let repeated = self.kleene_star(tail);
        self.concatenate(a, repeated)
    }

    /// Zero or one occurrence of `a`
    pub fn optional(&mut self, a: Fragment) -> Fragment {
        let none = self.empty();
        self.alternate(a, none)
    }

    /// Append a structural copy of every state reachable from `a`.
    ///
    /// Accept kinds (labels and priorities) are copied along with the edges.
    pub fn deep_copy(&mut self, a: &Fragment) -> Fragment {
        let mut mapping: Vec<Option<StateId>> = vec![None; self.states.len()];
        let mut order: Vec<StateId> = Vec::new();
        let mut stack: Vec<StateId> = vec![a.start];
        stack.extend(a.accepts.iter().rev().copied());

        while let Some(old) = stack.pop() {
            if mapping[old].is_some() {
                continue;
            }
            mapping[old] = Some(self.states.len() + order.len());
            order.push(old);

            let state = &self.states[old];
            for transition in state.transitions.iter().rev() {
                stack.push(transition.target);
            }
            for &next in state.epsilon.iter().rev() {
                stack.push(next);
            }
        }

        let remap = |id: StateId| mapping[id].unwrap_or(id);
        let copies: Vec<NfaState<L>> = order
            .iter()
            .map(|&old| {
                let state = &self.states[old];
                NfaState {
                    epsilon: state.epsilon.iter().map(|&id| remap(id)).collect(),
                    transitions: state
                        .transitions
                        .iter()
                        .map(|t| Transition {
                            class: t.class,
                            target: remap(t.target),
                        })
                        .collect(),
                    kind: state.kind.clone(),
                }
            })
            .collect();
        self.states.extend(copies);

        Fragment {
            start: remap(a.start),
            accepts: a.accepts.iter().map(|&id| remap(id)).collect(),
        }
    }

    /// Freeze the arena into an immutable automaton rooted at `root`
    pub fn build(self, root: Fragment) -> Automaton<L> {
        debug_assert!(root.start < self.states.len(), "root must come from this builder");

        log_debug!("Automaton built",
            "states" => self.states.len(),
            "accepts" => root.accepts.len()
        );

        Automaton::from_parts(self.states, root.start, root.accepts)
    }
}

impl<L: Clone> Default for AutomatonBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}
