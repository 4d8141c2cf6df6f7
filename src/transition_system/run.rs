use tracing::trace;

use crate::{math::OrderedSet, prelude::*};

/// The result of running a [`DFA`] on a finite input. The trace starts with the initial state
/// and contains one further state for every symbol that could be consumed. If the run gets
/// stuck, either because a symbol is not part of the alphabet or because the automaton is
/// partial, the trace ends in the last state that was reached and the run is not accepting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiniteRun {
    /// Whether the input is accepted.
    pub accepted: bool,
    /// The sequence of visited states.
    pub trace: Vec<StateIndex>,
}

impl FiniteRun {
    /// Returns the number of symbols that were consumed.
    pub fn consumed(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// Returns the last state of the trace.
    pub fn reached(&self) -> Option<StateIndex> {
        self.trace.last().cloned()
    }

    /// Translates the trace into the names of the visited states.
    pub fn state_names<'a>(&self, dfa: &'a DFA) -> Vec<&'a str> {
        self.trace
            .iter()
            .filter_map(|q| dfa.state_name(*q))
            .collect()
    }
}

/// The result of running an [`NFA`] on a finite input. The trace contains the set of active
/// states (closed under epsilon moves) before any input is read and after each symbol. If a
/// symbol leaves no state active, the trace ends with the last non-empty set and the run is
/// not accepting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NondeterministicRun {
    /// Whether the input is accepted.
    pub accepted: bool,
    /// The sequence of active state sets.
    pub trace: Vec<OrderedSet<StateIndex>>,
}

impl DFA {
    /// Runs `self` on the given input and collects the visited states. Symbols that are not
    /// part of the alphabet never produce an error, they lead to rejection.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let dfa = TSBuilder::default()
    ///     .with_state_colors([false, true])
    ///     .with_edges([(0, 'a', 1), (1, 'a', 0)])
    ///     .into_dfa(0);
    /// let run = dfa.run("aaa");
    /// assert!(run.accepted);
    /// assert_eq!(run.trace, vec![0, 1, 0, 1]);
    ///
    /// let run = dfa.run("ab");
    /// assert!(!run.accepted);
    /// assert_eq!(run.trace, vec![0, 1]);
    /// ```
    pub fn run(&self, input: &str) -> FiniteRun {
        let mut trace = vec![self.initial()];
        let mut current = self.initial();
        for symbol in input.chars() {
            match self.successor(current, symbol) {
                Some(next) => {
                    current = next;
                    trace.push(current);
                }
                None => {
                    trace!(
                        "run got stuck in state {current} on symbol {symbol} after {} symbols",
                        trace.len() - 1
                    );
                    return FiniteRun {
                        accepted: false,
                        trace,
                    };
                }
            }
        }
        FiniteRun {
            accepted: self.is_accepting(current),
            trace,
        }
    }

    /// Returns the state that is reached from `origin` when reading `input`, if the run does
    /// not get stuck.
    pub fn reached_state_index_from(&self, origin: StateIndex, input: &str) -> Option<StateIndex> {
        input
            .chars()
            .try_fold(origin, |q, symbol| self.successor(q, symbol))
    }

    /// Returns true if `self` accepts the given input.
    pub fn accepts(&self, input: &str) -> bool {
        self.reached_state_index_from(self.initial(), input)
            .is_some_and(|q| self.is_accepting(q))
    }

    /// Searches `text` for non-empty factors accepted by `self` and returns the positions
    /// (counted in characters) at which such a factor starts. Every position is reported at
    /// most once, even if several factors starting there are accepted.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let dfa = NFA::from_regex("ab").unwrap().determinize();
    /// assert_eq!(dfa.match_starts("abcab"), vec![0, 3]);
    /// ```
    pub fn match_starts(&self, text: &str) -> Vec<usize> {
        let symbols: Vec<Symbol> = text.chars().collect();
        (0..symbols.len())
            .filter(|start| {
                let mut current = self.initial();
                for symbol in &symbols[*start..] {
                    match self.successor(current, *symbol) {
                        Some(next) if self.is_accepting(next) => return true,
                        Some(next) => current = next,
                        None => return false,
                    }
                }
                false
            })
            .collect()
    }
}

impl NFA {
    /// Runs `self` on the given input, keeping track of the set of active states.
    pub fn run(&self, input: &str) -> NondeterministicRun {
        let mut current = self.initial_closure();
        let mut trace = vec![current.clone()];
        for symbol in input.chars() {
            current = self.epsilon_closure(self.step(&current, symbol));
            if current.is_empty() {
                return NondeterministicRun {
                    accepted: false,
                    trace,
                };
            }
            trace.push(current.clone());
        }
        NondeterministicRun {
            accepted: self.any_final(&current),
            trace,
        }
    }
}
