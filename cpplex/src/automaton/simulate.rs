//! Thompson simulation of a frozen automaton
//!
//! The simulator walks a set of live states in lock-step over the input:
//! epsilon closure, then one character-conditioned step, repeated until the
//! set dies or the text ends. The best accepting candidate seen along the way
//! is the longest one; ties on length go to the strictly lower priority, then
//! to the state discovered first.

use super::state::{NfaState, StateId, StateKind};

/// Outcome of a successful match attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<L> {
    /// Number of characters consumed from the start offset
    pub length: usize,
    pub label: L,
    pub priority: u32,
}

/// Immutable automaton produced by [`AutomatonBuilder::build`](super::AutomatonBuilder::build)
#[derive(Debug, Clone)]
pub struct Automaton<L> {
    states: Vec<NfaState<L>>,
    start: StateId,
    accepts: Vec<StateId>,
}

impl<L: Clone> Automaton<L> {
    pub(crate) fn from_parts(states: Vec<NfaState<L>>, start: StateId, accepts: Vec<StateId>) -> Self {
        Self {
            states,
            start,
            accepts,
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepts(&self) -> &[StateId] {
        &self.accepts
    }

    pub fn state(&self, id: StateId) -> Option<&NfaState<L>> {
        self.states.get(id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Find the longest labeled match of `text` beginning at `start`.
    ///
    /// Returns `None` when no accepting state is ever reached. A zero-length
    /// result is possible when the start closure already accepts; `start`
    /// past the end of `text` only ever yields such a result.
    pub fn match_longest(&self, text: &[char], start: usize) -> Option<MatchResult<L>> {
        let mut current = StateSet::with_capacity(self.states.len());
        let mut moved = StateSet::with_capacity(self.states.len());

        current.insert(self.start);
        self.close(&mut current);

        let mut best: Option<MatchResult<L>> = None;
        let mut consumed = 0;
        let mut cursor = start;

        loop {
            self.collect_candidate(&current, consumed, &mut best);

            let Some(&ch) = text.get(cursor) else {
                return best;
            };

            moved.clear();
            for id in current.iter() {
                for transition in &self.states[id].transitions {
                    if transition.class.matches(ch) {
                        moved.insert(transition.target);
                    }
                }
            }
            if moved.is_empty() {
                return best;
            }

            self.close(&mut moved);
            std::mem::swap(&mut current, &mut moved);
            consumed += 1;
            cursor += 1;
        }
    }

    /// Whether the automaton accepts the whole of `text`.
    ///
    /// A state counts as accepting when it is one of the root accepts or
    /// carries an accepting label.
    pub fn accepts_text(&self, text: &str) -> bool {
        let mut current = StateSet::with_capacity(self.states.len());
        let mut moved = StateSet::with_capacity(self.states.len());

        current.insert(self.start);
        self.close(&mut current);

        for ch in text.chars() {
            moved.clear();
            for id in current.iter() {
                for transition in &self.states[id].transitions {
                    if transition.class.matches(ch) {
                        moved.insert(transition.target);
                    }
                }
            }
            if moved.is_empty() {
                return false;
            }
            self.close(&mut moved);
            std::mem::swap(&mut current, &mut moved);
        }

        let accepted = current
            .iter()
            .any(|id| self.accepts.contains(&id) || self.states[id].kind.is_accepting());
        accepted
    }

    /// Extend `set` in place with everything reachable through epsilon edges
    fn close(&self, set: &mut StateSet) {
        let mut index = 0;
        while let Some(id) = set.get(index) {
            for &next in &self.states[id].epsilon {
                set.insert(next);
            }
            index += 1;
        }
    }

    fn collect_candidate(&self, set: &StateSet, consumed: usize, best: &mut Option<MatchResult<L>>) {
        for id in set.iter() {
            let StateKind::Accepting { label, priority } = &self.states[id].kind else {
                continue;
            };
            let better = match best {
                None => true,
                Some(current) => {
                    consumed > current.length
                        || (consumed == current.length && *priority < current.priority)
                }
            };
            if better {
                *best = Some(MatchResult {
                    length: consumed,
                    label: label.clone(),
                    priority: *priority,
                });
            }
        }
    }
}

/// Dense set of state ids: membership bitmap plus insertion order
#[derive(Debug, Clone)]
struct StateSet {
    member: Vec<bool>,
    order: Vec<StateId>,
}

impl StateSet {
    fn with_capacity(states: usize) -> Self {
        Self {
            member: vec![false; states],
            order: Vec::new(),
        }
    }

    fn insert(&mut self, id: StateId) -> bool {
        if self.member[id] {
            return false;
        }
        self.member[id] = true;
        self.order.push(id);
        true
    }

    fn get(&self, index: usize) -> Option<StateId> {
        self.order.get(index).copied()
    }

    fn clear(&mut self) {
        for &id in &self.order {
            self.member[id] = false;
        }
        self.order.clear();
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.order.iter().copied()
    }
}
