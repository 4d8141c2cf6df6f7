use itertools::Itertools;

use crate::{
    alphabet::Symbol,
    automaton::DfaState,
    math::{OrderedMap, Set},
    prelude::*,
};

/// Helper struct for the construction of automata. It stores a list of edges, a list of
/// epsilon edges, a list of state colors and a default color. A state color of `true` means
/// the state is accepting (respectively final).
///
/// The number of states is determined by the largest index that is mentioned anywhere, so
/// states without edges can be created by giving them a color.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']`, which
/// accepts all words with an even number of `b`s. State 0 should be initial and accepting.
/// ```
/// use regular_automata::prelude::*;
///
/// let dfa = TSBuilder::default()
///     .with_state_colors([true, false]) // colors given in the order of the states
///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .into_dfa(0); // 0 is the initial state
/// assert!(dfa.accepts("abab"));
/// assert!(!dfa.accepts("ab"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TSBuilder {
    symbols: Set<Symbol>,
    edges: Vec<(StateIndex, Symbol, StateIndex)>,
    epsilon_edges: Vec<(StateIndex, StateIndex)>,
    default: Option<bool>,
    colors: Vec<(StateIndex, bool)>,
}

impl TSBuilder {
    /// Sets the default color for states that have no color specified.
    pub fn default_color(mut self, color: bool) -> Self {
        self.default = Some(color);
        self
    }

    /// By default, the only alphabet symbols in the automaton that is built are the ones that
    /// appear on at least one edge. This method can be used to force additional alphabet
    /// symbols to appear.
    pub fn with_alphabet_symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.symbols.extend(symbols);
        self
    }

    /// Adds a list of colors to `self`. The colors are assigned to the states in the order in
    /// which they are given, so `[true, false]` makes state `0` accepting and state `1`
    /// rejecting.
    pub fn with_state_colors<I: IntoIterator<Item = bool>>(self, iter: I) -> Self {
        iter.into_iter()
            .enumerate()
            .fold(self, |acc, (i, x)| acc.color(i, x))
    }

    /// Assigns the given color to the state with index `state`, overwriting a previously
    /// assigned color.
    pub fn color(mut self, state: StateIndex, color: bool) -> Self {
        self.colors.retain(|(q, _)| *q != state);
        self.colors.push((state, color));
        self
    }

    /// Adds the given edges, each consisting of source, symbol and target.
    pub fn with_edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, Symbol, StateIndex)>,
    {
        self.edges.extend(edges);
        self
    }

    /// Adds the given epsilon edges, each consisting of source and target. These are only
    /// taken into account by [`TSBuilder::into_nfa`].
    pub fn with_epsilon_edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, StateIndex)>,
    {
        self.epsilon_edges.extend(edges);
        self
    }

    /// Returns the number of states the built automaton will have.
    pub fn num_states(&self) -> usize {
        self.edges
            .iter()
            .flat_map(|(q, _, p)| [*q, *p])
            .chain(self.epsilon_edges.iter().flat_map(|(q, p)| [*q, *p]))
            .chain(self.colors.iter().map(|(q, _)| *q))
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    fn alphabet(&self) -> CharAlphabet {
        self.edges
            .iter()
            .map(|(_, sym, _)| *sym)
            .chain(self.symbols.iter().cloned())
            .collect()
    }

    fn colors(&self, num_states: usize) -> Vec<bool> {
        (0..num_states)
            .map(|i| {
                self.colors
                    .iter()
                    .find_map(|(q, c)| (*q == i).then_some(*c))
                    .or(self.default)
                    .unwrap_or_else(|| {
                        panic!("Default is needed as some states (specifically {i}) have no color")
                    })
            })
            .collect()
    }

    /// Builds an [`NFA`] with the given initial state from `self`.
    ///
    /// # Panics
    /// Panics if some state has no color and no default color was set.
    pub fn into_nfa(self, initial: StateIndex) -> NFA {
        let num_states = self.num_states().max(initial + 1);
        let mut nfa = NFA::empty();
        for color in self.colors(num_states) {
            nfa.add_state(color);
        }
        for (q, sym, p) in self.edges {
            nfa.add_transition(q, sym, p);
        }
        for (q, p) in self.epsilon_edges {
            nfa.add_epsilon(q, p);
        }
        nfa.set_initial(initial);
        nfa
    }

    /// Builds a [`DFA`] with the given initial state from `self`. The state with index `i` is
    /// named `qi`. The automaton may be partial, symbols given through
    /// [`TSBuilder::with_alphabet_symbols`] belong to its alphabet even if no edge uses them.
    ///
    /// # Panics
    /// Panics if some state has no color and no default color was set, if epsilon edges were
    /// given or if two edges leave the same state on the same symbol with different targets.
    pub fn into_dfa(self, initial: StateIndex) -> DFA {
        assert!(
            self.epsilon_edges.is_empty(),
            "Epsilon edges cannot be part of a deterministic automaton"
        );
        let num_states = self.num_states().max(initial + 1);
        let alphabet = self.alphabet();

        let mut edges: Vec<OrderedMap<Symbol, StateIndex>> = vec![OrderedMap::new(); num_states];
        for (q, sym, p) in self.edges.iter().unique() {
            if let Some(existing) = edges[*q].insert(*sym, *p) {
                panic!(
                    "State {q} has two transitions on {sym}, leading to {existing} and {p}"
                );
            }
        }

        let states = self
            .colors(num_states)
            .into_iter()
            .zip(edges)
            .enumerate()
            .map(|(i, (accepting, edges))| {
                let mut state = DfaState::new(format!("q{i}"), accepting);
                for (sym, p) in edges {
                    state.add_edge(sym, p);
                }
                state
            })
            .collect();

        DFA::from_parts(alphabet, states, initial)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builder_counts_states_from_indices() {
        let builder = TSBuilder::default()
            .default_color(false)
            .with_edges([(0, 'a', 3)])
            .color(5, true);
        assert_eq!(builder.num_states(), 6);

        let dfa = builder.into_dfa(0);
        assert_eq!(dfa.size(), 6);
        assert!(dfa.is_accepting(5));
        assert_eq!(dfa.state_name(3), Some("q3"));
        assert_eq!(dfa.alphabet(), &CharAlphabet::from_iter(['a']));
    }

    #[test]
    fn builder_alphabet_symbols() {
        let dfa = TSBuilder::default()
            .with_state_colors([true])
            .with_edges([(0, 'b', 0)])
            .with_alphabet_symbols(['a'])
            .into_dfa(0);
        assert_eq!(dfa.alphabet().size(), 2);
        assert!(!dfa.is_complete());
        assert!(dfa.accepts("bb"));
        assert!(!dfa.accepts("a"));
    }

    #[test]
    fn builder_nfa_keeps_nondeterminism() {
        let nfa = TSBuilder::default()
            .with_state_colors([false, true, true])
            .with_edges([(0, 'a', 1), (0, 'a', 2)])
            .with_epsilon_edges([(1, 0)])
            .into_nfa(0);
        assert_eq!(nfa.size(), 3);
        assert_eq!(
            nfa.step(&OrderedSet::<StateIndex>::from_iter([0]), 'a'),
            OrderedSet::from_iter([1, 2])
        );
        assert!(nfa.accepts("aa"));
    }

    #[test]
    #[should_panic]
    fn builder_rejects_nondeterministic_dfa() {
        TSBuilder::default()
            .default_color(false)
            .with_edges([(0, 'a', 1), (0, 'a', 0)])
            .into_dfa(0);
    }

    #[test]
    #[should_panic]
    fn builder_needs_colors() {
        TSBuilder::default().with_edges([(0, 'a', 1)]).into_dfa(0);
    }
}
