use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    automaton::DfaState,
    math::{Bijection, OrderedSet},
    prelude::*,
};

impl NFA {
    /// Determinizes `self` through the subset construction, see
    /// [`NFA::subset_construction`].
    pub fn determinize(&self) -> DFA {
        self.subset_construction().0
    }

    /// Performs the subset construction and returns the resulting [`DFA`] together with the
    /// correspondence between sets of states of `self` and states of the [`DFA`].
    ///
    /// The initial state of the result is the epsilon closure of the initial state of `self`,
    /// its name is `q0`. Further sets are explored breadth first, for each set the symbols of
    /// the alphabet are considered in ascending order, and every newly discovered set receives
    /// the next free index `i` and the name `qi`. Thus, the numbering depends only on `self`.
    /// A set is accepting if it contains a final state of `self`. Transitions into the empty set
    /// are omitted, so the result may be partial. If `self` has no transitions at all, the result
    /// has a single state and an empty alphabet.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let nfa = NFA::from_regex("a*").unwrap();
    /// let (dfa, subsets) = nfa.subset_construction();
    /// assert_eq!(dfa.size(), 2);
    /// assert_eq!(subsets.get_by_right(&0), Some(&nfa.initial_closure()));
    /// ```
    pub fn subset_construction(&self) -> (DFA, Bijection<OrderedSet<StateIndex>, StateIndex>) {
        let alphabet = self.alphabet();
        let mut subsets = Bijection::new();
        let mut states = vec![];
        let mut queue = VecDeque::new();

        let initial = self.initial_closure();
        states.push(DfaState::new("q0", self.any_final(&initial)));
        subsets.insert(initial.clone(), 0);
        queue.push_back((initial, 0));

        while let Some((current, source)) = queue.pop_front() {
            for symbol in alphabet.universe() {
                let reached = self.epsilon_closure(self.step(&current, symbol));
                if reached.is_empty() {
                    continue;
                }
                let target = match subsets.get_by_left(&reached) {
                    Some(target) => *target,
                    None => {
                        let target = states.len();
                        trace!("discovered subset {} as state {target}", reached.show());
                        states.push(DfaState::new(
                            format!("q{target}"),
                            self.any_final(&reached),
                        ));
                        subsets.insert(reached.clone(), target);
                        queue.push_back((reached, target));
                        target
                    }
                };
                states[source].add_edge(symbol, target);
            }
        }

        debug!(
            "subset construction turned {} nfa states into {} dfa states",
            self.size(),
            states.len()
        );
        (DFA::from_parts(alphabet, states, 0), subsets)
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::OrderedSet, prelude::*};

    #[test_log::test]
    fn subset_construction_numbering() {
        let nfa = NFA::from_regex("a(b|c)d").unwrap();
        let (dfa, subsets) = nfa.subset_construction();
        assert_eq!(dfa.size(), 5);
        assert_eq!(dfa.alphabet(), &CharAlphabet::from_iter(['a', 'b', 'c', 'd']));
        assert_eq!(dfa.successor(0, 'a'), Some(1));
        assert_eq!(dfa.successor(1, 'b'), Some(2));
        assert_eq!(dfa.successor(1, 'c'), Some(3));
        assert_eq!(dfa.successor(2, 'd'), Some(4));
        assert_eq!(dfa.successor(3, 'd'), Some(4));
        assert_eq!(dfa.successor(0, 'b'), None);
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![4]);
        assert_eq!(dfa.state_name(3), Some("q3"));

        assert_eq!(subsets.len(), 5);
        for (set, q) in subsets.iter() {
            assert_eq!(nfa.any_final(set), dfa.is_accepting(*q));
        }

        // determinization is deterministic
        assert_eq!(nfa.determinize(), dfa);

        assert!(dfa.accepts("abd"));
        assert!(dfa.accepts("acd"));
        assert!(!dfa.accepts("abcd"));
        assert!(!dfa.accepts("ad"));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn kleene_star_determinization() {
        let dfa = NFA::from_regex("a*").unwrap().determinize();
        assert_eq!(dfa.size(), 2);
        assert!(dfa.is_accepting(0));
        assert!(dfa.is_accepting(1));
        assert_eq!(dfa.successor(1, 'a'), Some(1));
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("aaaa"));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("ab"));
    }

    #[test]
    fn empty_alphabet_gives_single_state() {
        let nfa = NFA::from_regex("").unwrap();
        let dfa = nfa.determinize();
        assert_eq!(dfa.size(), 1);
        assert!(dfa.alphabet().is_empty());
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn determinization_preserves_language() {
        for expression in ["(a|b)*abb", "a+b*|ba", "(ab)*(c|a)", "(a|b)(a|b)*a"] {
            let nfa = NFA::from_regex(expression).unwrap();
            let dfa = nfa.determinize();
            let universe: CharAlphabet = nfa.alphabet().universe().chain(['z']).collect();
            for word in universe.words_up_to(5) {
                assert_eq!(nfa.accepts(&word), dfa.accepts(&word), "{expression} on {word}");
            }
        }

        let nfa = TSBuilder::default()
            .default_color(false)
            .color(2, true)
            .with_edges([(0, 'a', 0), (0, 'b', 0), (0, 'a', 1), (1, 'b', 2)])
            .with_epsilon_edges([(2, 0)])
            .into_nfa(0);
        let (dfa, subsets) = nfa.subset_construction();
        assert_eq!(
            subsets.get_by_left(&OrderedSet::from_iter([0, 1])),
            Some(&1)
        );
        for word in nfa.alphabet().words_up_to(6) {
            assert_eq!(nfa.accepts(&word), dfa.accepts(&word));
        }
    }
}
