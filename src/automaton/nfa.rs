use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    alphabet::Symbol,
    math::{OrderedMap, OrderedSet},
    prelude::*,
};

/// A single state of an [`NFA`]. It stores whether it is final, its outgoing transitions
/// grouped by symbol and its outgoing epsilon moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NfaState {
    is_final: bool,
    transitions: OrderedMap<Symbol, OrderedSet<StateIndex>>,
    epsilon: OrderedSet<StateIndex>,
}

impl NfaState {
    /// Returns true if the state is final.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Returns the targets of the transitions on `symbol`, which may be empty.
    pub fn successors(&self, symbol: Symbol) -> impl Iterator<Item = StateIndex> + '_ {
        self.transitions.get(&symbol).into_iter().flatten().cloned()
    }

    /// Returns the targets of the epsilon moves leaving this state.
    pub fn epsilon_successors(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.epsilon.iter().cloned()
    }

    /// Iterates over all transitions (but not the epsilon moves) leaving this state as pairs
    /// of symbol and target.
    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, StateIndex)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(sym, targets)| targets.iter().map(move |q| (*sym, *q)))
    }
}

/// A nondeterministic finite automaton with epsilon moves.
///
/// All states of the automaton live in an arena that is owned by the automaton itself, a
/// [`StateIndex`] is simply a position in that arena. Consequently indices are only meaningful
/// with respect to the automaton that produced them and every state that can be reached from
/// the initial state is automatically a state of the automaton. The epsilon moves may form
/// cycles (Kleene star produces back edges), all operations in here are safe in that regard.
///
/// Once built, an [`NFA`] is never modified, so it can be shared freely between threads.
///
/// # Example
/// ```
/// use regular_automata::prelude::*;
///
/// // accepts all words that end in `ab`
/// let nfa = TSBuilder::default()
///     .with_state_colors([false, false, true])
///     .with_edges([(0, 'a', 0), (0, 'b', 0), (0, 'a', 1), (1, 'b', 2)])
///     .into_nfa(0);
/// assert!(nfa.accepts("bab"));
/// assert!(!nfa.accepts("aba"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NFA {
    states: Vec<NfaState>,
    initial: StateIndex,
}

impl NFA {
    /// Instantiates a new [`TSBuilder`], which can be used to create an [`NFA`] through
    /// [`TSBuilder::into_nfa`].
    pub fn builder() -> TSBuilder {
        TSBuilder::default()
    }

    /// Compiles the given regular expression, see [`regex::compile`].
    pub fn from_regex(expression: &str) -> Result<Self, RegexError> {
        regex::compile(expression)
    }

    /// Creates an automaton whose arena is empty. States have to be added before the
    /// automaton is handed out.
    pub(crate) fn empty() -> Self {
        Self {
            states: vec![],
            initial: 0,
        }
    }

    pub(crate) fn add_state(&mut self, is_final: bool) -> StateIndex {
        self.states.push(NfaState {
            is_final,
            ..Default::default()
        });
        self.states.len() - 1
    }

    pub(crate) fn add_transition(&mut self, from: StateIndex, symbol: Symbol, to: StateIndex) {
        self.states[from]
            .transitions
            .entry(symbol)
            .or_default()
            .insert(to);
    }

    pub(crate) fn add_epsilon(&mut self, from: StateIndex, to: StateIndex) {
        self.states[from].epsilon.insert(to);
    }

    pub(crate) fn set_final(&mut self, state: StateIndex, is_final: bool) {
        self.states[state].is_final = is_final;
    }

    pub(crate) fn set_initial(&mut self, state: StateIndex) {
        debug_assert!(state < self.states.len());
        self.initial = state;
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the index of the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Returns an iterator over the indices of all states.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.states.len()
    }

    /// Gives a reference to the state with the given index, if it exists.
    pub fn state(&self, index: StateIndex) -> Option<&NfaState> {
        self.states.get(index)
    }

    /// Returns true if the state with the given index exists and is final.
    pub fn is_final(&self, index: StateIndex) -> bool {
        self.state(index).map(NfaState::is_final).unwrap_or(false)
    }

    /// Returns the indices of all final states.
    pub fn final_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|q| self.states[*q].is_final)
    }

    /// Collects the alphabet of the automaton, which consists of every symbol that labels
    /// some transition. Epsilon moves do not contribute.
    pub fn alphabet(&self) -> CharAlphabet {
        self.states
            .iter()
            .flat_map(|state| state.transitions.keys().cloned())
            .collect()
    }

    /// Computes the epsilon closure of the given states, that is the set of all states which
    /// can be reached through zero or more epsilon moves. The result always contains the given
    /// states themselves. Indices that do not belong to the automaton are ignored.
    pub fn epsilon_closure<I>(&self, states: I) -> OrderedSet<StateIndex>
    where
        I: IntoIterator<Item = StateIndex>,
    {
        let mut seen = BitSet::with_capacity(self.size());
        let mut stack = states
            .into_iter()
            .filter(|q| *q < self.size())
            .collect_vec();
        for q in &stack {
            seen.insert(*q);
        }

        while let Some(q) = stack.pop() {
            for p in self.states[q].epsilon_successors() {
                if seen.insert(p) {
                    stack.push(p);
                }
            }
        }

        seen.iter().collect()
    }

    /// Computes the set of states that can be reached from any of the given states by taking
    /// precisely one transition on `symbol`. Epsilon moves are not taken.
    pub fn step<'a, I>(&self, states: I, symbol: Symbol) -> OrderedSet<StateIndex>
    where
        I: IntoIterator<Item = &'a StateIndex>,
    {
        states
            .into_iter()
            .filter_map(|q| self.state(*q))
            .flat_map(|state| state.successors(symbol))
            .collect()
    }

    /// Returns the set of states that is active before any input has been read.
    pub fn initial_closure(&self) -> OrderedSet<StateIndex> {
        self.epsilon_closure([self.initial])
    }

    /// Returns true if some final state is among the given states.
    pub fn any_final<'a, I>(&self, states: I) -> bool
    where
        I: IntoIterator<Item = &'a StateIndex>,
    {
        states.into_iter().any(|q| self.is_final(*q))
    }

    /// Returns whether the automaton accepts the given input. Symbols for which no transition
    /// exists (in particular symbols that are not in the alphabet) lead to rejection, the
    /// simulation stops as soon as no state is active anymore.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.initial_closure();
        for symbol in input.chars() {
            current = self.epsilon_closure(self.step(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }
        self.any_final(&current)
    }
}

impl std::fmt::Display for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, state) in self.states.iter().enumerate() {
            let marker = match (index == self.initial, state.is_final) {
                (true, true) => "→*",
                (true, false) => "→ ",
                (false, true) => " *",
                (false, false) => "  ",
            };
            write!(f, "{marker}{index}:")?;
            for (sym, targets) in &state.transitions {
                write!(f, " {sym}→{}", targets.show())?;
            }
            if !state.epsilon.is_empty() {
                write!(f, " ε→{}", state.epsilon.show())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::OrderedSet, prelude::*};

    fn epsilon_cycle() -> NFA {
        // 0 -ε-> 1 -ε-> 2 -ε-> 0, 2 -a-> 3 (final)
        TSBuilder::default()
            .default_color(false)
            .with_state_colors([false, false, false, true])
            .with_epsilon_edges([(0, 1), (1, 2), (2, 0)])
            .with_edges([(2, 'a', 3)])
            .into_nfa(0)
    }

    #[test]
    fn epsilon_closure_terminates_on_cycles() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.epsilon_closure([0]), OrderedSet::from_iter([0, 1, 2]));
        assert_eq!(nfa.epsilon_closure([3]), OrderedSet::from_iter([3]));
        assert_eq!(nfa.epsilon_closure([1, 3]), OrderedSet::from_iter([0, 1, 2, 3]));
        assert!(nfa.epsilon_closure([]).is_empty());
    }

    #[test]
    fn step_ignores_epsilon_moves() {
        let nfa = epsilon_cycle();
        assert!(nfa.step(&OrderedSet::<StateIndex>::from_iter([0]), 'a').is_empty());
        assert_eq!(
            nfa.step(&OrderedSet::<StateIndex>::from_iter([0, 1, 2]), 'a'),
            OrderedSet::from_iter([3])
        );
        assert!(nfa.step(&OrderedSet::<StateIndex>::from_iter([2]), 'b').is_empty());
    }

    #[test]
    fn acceptance_with_unknown_symbols() {
        let nfa = epsilon_cycle();
        assert_eq!(nfa.alphabet(), CharAlphabet::from_iter(['a']));
        assert!(nfa.accepts("a"));
        assert!(!nfa.accepts(""));
        assert!(!nfa.accepts("aa"));
        assert!(!nfa.accepts("z"));
        assert!(!nfa.accepts("az"));
    }

    #[test]
    fn display_marks_initial_and_final_states() {
        let nfa = epsilon_cycle();
        let shown = nfa.to_string();
        assert!(shown.starts_with("→ 0: ε→{1}"));
        assert!(shown.contains(" *3:"));
        assert!(shown.contains("2: a→{3} ε→{0}"));
    }
}
