//! Rule composition: labeling accept states and folding rules into one automaton

use super::builder::{AutomatonBuilder, Fragment};
use super::state::StateKind;

/// A rule fragment together with the token label it produces and its tie-break priority.
///
/// Lower priority wins when two rules match the same length.
#[derive(Debug)]
pub struct LabeledRule<L> {
    pub fragment: Fragment,
    pub label: L,
    pub priority: u32,
}

impl<L> LabeledRule<L> {
    pub fn new(fragment: Fragment, label: L, priority: u32) -> Self {
        Self {
            fragment,
            label,
            priority,
        }
    }
}

impl<L: Clone> AutomatonBuilder<L> {
    /// Tag every current accept state of `fragment` with `(label, priority)`.
    ///
    /// Must run before the fragment is folded into an alternation: the shared
    /// accept state an alternation introduces stays plain.
    pub fn label_accepts(&mut self, fragment: &Fragment, label: L, priority: u32) {
        for &accept in fragment.accepts() {
            self.state_mut(accept).kind = StateKind::Accepting {
                label: label.clone(),
                priority,
            };
        }
    }

    /// Label each rule and left-fold them with `alternate`.
    ///
    /// An empty rule list yields the empty-string automaton.
    pub fn combine_alternation(&mut self, rules: Vec<LabeledRule<L>>) -> Fragment {
        let mut combined: Option<Fragment> = None;
        for rule in rules {
            self.label_accepts(&rule.fragment, rule.label, rule.priority);
            combined = Some(match combined {
                Some(acc) => self.alternate(acc, rule.fragment),
                None => rule.fragment,
            });
        }
        combined.unwrap_or_else(|| self.empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::CharClass;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Rule {
        Word,
        If,
        Digits,
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn word_rules(builder: &mut AutomatonBuilder<Rule>, if_first: bool) -> Vec<LabeledRule<Rule>> {
        let keyword = builder.literal("if");
        let start = builder.char_atom(CharClass::IdentStart);
        let rest = builder.char_atom(CharClass::IdentContinue);
        let rest = builder.kleene_star(rest);
        let word = builder.concatenate(start, rest);
        let digit = builder.char_atom(CharClass::AsciiDigit);
        let digits = builder.plus(digit);

        let keyword = LabeledRule::new(keyword, Rule::If, 1);
        let word = LabeledRule::new(word, Rule::Word, 2);
        let digits = LabeledRule::new(digits, Rule::Digits, 2);
        if if_first {
            vec![keyword, word, digits]
        } else {
            vec![digits, word, keyword]
        }
    }

    #[test]
    fn test_label_accepts_marks_only_current_accepts() {
        let mut builder: AutomatonBuilder<Rule> = AutomatonBuilder::new();
        let word = builder.literal("ab");
        builder.label_accepts(&word, Rule::Word, 7);
        let accepts = word.accepts().to_vec();
        let other = builder.literal("c");
        let combined = builder.alternate(word, other);
        let shared = combined.accepts().to_vec();
        let nfa = builder.build(combined);

        for id in accepts {
            assert!(nfa.state(id).is_some_and(|s| s.kind.is_accepting()));
        }
        for id in shared {
            assert!(nfa.state(id).is_some_and(|s| !s.kind.is_accepting()));
        }
    }

    #[test]
    fn test_priority_breaks_equal_length_ties() {
        let mut builder = AutomatonBuilder::new();
        let rules = word_rules(&mut builder, false);
        let root = builder.combine_alternation(rules);
        let nfa = builder.build(root);

        let result = nfa.match_longest(&chars("if"), 0).expect("match");
        assert_eq!(result.label, Rule::If);
        assert_eq!(result.length, 2);

        let result = nfa.match_longest(&chars("iffy"), 0).expect("match");
        assert_eq!(result.label, Rule::Word);
        assert_eq!(result.length, 4);
    }

    #[test]
    fn test_rule_order_does_not_change_outcome() {
        for input in ["if", "iffy", "x1", "123", "if(", "9a"] {
            let text = chars(input);

            let mut forward = AutomatonBuilder::new();
            let rules = word_rules(&mut forward, true);
            let root = forward.combine_alternation(rules);
            let forward = forward.build(root);

            let mut backward = AutomatonBuilder::new();
            let rules = word_rules(&mut backward, false);
            let root = backward.combine_alternation(rules);
            let backward = backward.build(root);

            assert_eq!(
                forward.match_longest(&text, 0),
                backward.match_longest(&text, 0),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_empty_rule_list() {
        let mut builder: AutomatonBuilder<Rule> = AutomatonBuilder::new();
        let root = builder.combine_alternation(Vec::new());
        let nfa = builder.build(root);

        assert!(nfa.accepts_text(""));
        assert_eq!(nfa.match_longest(&chars("abc"), 0), None);
    }
}
