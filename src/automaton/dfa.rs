use itertools::Itertools;
use tracing::debug;

use crate::{
    alphabet::Symbol,
    math::{Map, OrderedMap},
    prelude::*,
};

use super::TRAP_STATE_NAME;

/// A single state of a [`DFA`], consisting of a name, the information whether the state is
/// accepting and at most one outgoing transition per symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(super) name: String,
    pub(super) accepting: bool,
    pub(super) edges: OrderedMap<Symbol, StateIndex>,
}

impl DfaState {
    pub(crate) fn new(name: impl Into<String>, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
            edges: OrderedMap::new(),
        }
    }

    /// Adds the transition on `symbol` to `target`, replacing an existing one.
    pub(crate) fn add_edge(&mut self, symbol: Symbol, target: StateIndex) {
        self.edges.insert(symbol, target);
    }

    /// The name of the state, used for display purposes and for referring to states of
    /// automata that were created from a [`TransitionTable`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Returns the target of the transition on `symbol`, if there is one.
    pub fn successor(&self, symbol: Symbol) -> Option<StateIndex> {
        self.edges.get(&symbol).cloned()
    }

    /// Iterates over the outgoing transitions in ascending order of their symbols.
    pub fn edges(&self) -> impl Iterator<Item = (Symbol, StateIndex)> + '_ {
        self.edges.iter().map(|(sym, q)| (*sym, *q))
    }
}

/// A deterministic finite automaton (DFA) accepts a finite word if its unique run on the word
/// reaches an accepting state.
///
/// A [`DFA`] may be *partial*, meaning that some state has no transition on some symbol of
/// its alphabet. Reading such a symbol in such a state leads to rejection. This is what the
/// subset construction produces, the total counterpart is obtained through [`DFA::complete`],
/// which adds a rejecting trap state.
///
/// Like the [`NFA`], a [`DFA`] is an immutable value. Operations such as [`DFA::complete`],
/// [`DFA::trim`] or minimization produce new automata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DFA {
    alphabet: CharAlphabet,
    pub(super) states: Vec<DfaState>,
    initial: StateIndex,
}

impl DFA {
    /// Instantiates a new [`TSBuilder`], which can be used to create a [`DFA`] through
    /// [`TSBuilder::into_dfa`].
    pub fn builder() -> TSBuilder {
        TSBuilder::default()
    }

    /// Assembles a [`DFA`] from its parts. All transitions must lead to existing states, use
    /// symbols from the alphabet and the initial state must exist.
    pub(crate) fn from_parts(
        alphabet: CharAlphabet,
        states: Vec<DfaState>,
        initial: StateIndex,
    ) -> Self {
        debug_assert!(initial < states.len(), "initial state must exist");
        debug_assert!(states.iter().all(|state| state
            .edges()
            .all(|(sym, q)| alphabet.contains(sym) && q < states.len())));
        Self {
            alphabet,
            states,
            initial,
        }
    }

    /// Returns a reference to the alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
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
    pub fn state(&self, index: StateIndex) -> Option<&DfaState> {
        self.states.get(index)
    }

    /// Returns the name of the state with the given index, if it exists.
    pub fn state_name(&self, index: StateIndex) -> Option<&str> {
        self.state(index).map(DfaState::name)
    }

    /// Looks up the index of the state with the given name.
    pub fn find_state(&self, name: &str) -> Option<StateIndex> {
        self.states.iter().position(|state| state.name == name)
    }

    /// Returns true if the state with the given index exists and is accepting.
    pub fn is_accepting(&self, index: StateIndex) -> bool {
        self.state(index)
            .map(DfaState::is_accepting)
            .unwrap_or(false)
    }

    /// Returns the indices of all states that are accepting.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|q| self.states[*q].accepting)
    }

    /// Returns the indices of all states that are rejecting.
    pub fn rejecting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|q| !self.states[*q].accepting)
    }

    /// Returns the state that is reached from `state` on `symbol`, if such a transition exists.
    pub fn successor(&self, state: StateIndex, symbol: Symbol) -> Option<StateIndex> {
        self.state(state)?.successor(symbol)
    }

    /// Returns the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|state| state.edges.len()).sum()
    }

    /// Returns true if every state has a transition on every symbol of the alphabet.
    pub fn is_complete(&self) -> bool {
        self.states
            .iter()
            .all(|state| state.edges.len() == self.alphabet.size())
    }

    /// Produces a total automaton that accepts the same language as `self`. If some transition
    /// is missing, a fresh rejecting trap state is added that loops to itself on every symbol
    /// and all missing transitions are redirected to it. If `self` is already total, it is
    /// simply cloned.
    pub fn complete(&self) -> DFA {
        self.completion().0
    }

    /// Works like [`DFA::complete`], but additionally returns the index of the trap state if
    /// one had to be added.
    pub(crate) fn completion(&self) -> (DFA, Option<StateIndex>) {
        if self.is_complete() {
            return (self.clone(), None);
        }

        let mut name = TRAP_STATE_NAME.to_string();
        while self.find_state(&name).is_some() {
            name.push('\'');
        }

        let trap = self.size();
        let mut states = self.states.clone();
        states.push(DfaState::new(name, false));
        let mut redirected = 0;
        for state in states.iter_mut() {
            for sym in self.alphabet.universe() {
                state.edges.entry(sym).or_insert_with(|| {
                    redirected += 1;
                    trap
                });
            }
        }
        debug!(
            "added trap state {} absorbing {} missing transitions",
            trap,
            redirected - self.alphabet.size()
        );

        (
            DFA::from_parts(self.alphabet.clone(), states, self.initial),
            Some(trap),
        )
    }

    /// Removes all states that cannot be reached from the initial state. The remaining states
    /// are renumbered in the order in which a breadth-first search from the initial state
    /// discovers them (see [`DFA::minimal_representatives`]), their names are kept.
    pub fn trim(&self) -> DFA {
        let order = self.reachable_state_indices().collect_vec();
        self.restrict_to(&order)
    }

    /// Builds the automaton consisting of precisely the given states, where the state at
    /// position `i` of `order` becomes state `i`. The initial state must be contained in
    /// `order`, transitions into states that are not contained are dropped.
    pub(crate) fn restrict_to(&self, order: &[StateIndex]) -> DFA {
        let renumbering: Map<StateIndex, StateIndex> = order
            .iter()
            .enumerate()
            .map(|(new, old)| (*old, new))
            .collect();

        let states = order
            .iter()
            .map(|old| {
                let state = &self.states[*old];
                DfaState {
                    name: state.name.clone(),
                    accepting: state.accepting,
                    edges: state
                        .edges()
                        .filter_map(|(sym, q)| renumbering.get(&q).map(|p| (sym, *p)))
                        .collect(),
                }
            })
            .collect();

        DFA::from_parts(
            self.alphabet.clone(),
            states,
            renumbering[&self.initial],
        )
    }

    /// Returns a copy of `self` in which `state` is the initial state. Together with
    /// [`DFA::equivalent`] this can be used to check whether two states of the same automaton
    /// are language equivalent.
    ///
    /// # Panics
    /// Panics if `state` does not exist.
    pub fn with_initial(&self, state: StateIndex) -> DFA {
        assert!(state < self.size(), "State {state} does not exist");
        DFA::from_parts(self.alphabet.clone(), self.states.clone(), state)
    }

    /// Returns a copy of `self` in which the state with index `i` is named by `naming(i)`.
    pub(crate) fn renamed<F: Fn(StateIndex) -> String>(mut self, naming: F) -> DFA {
        for (i, state) in self.states.iter_mut().enumerate() {
            state.name = naming(i);
        }
        self
    }

    /// Returns true if `state` is rejecting and all of its transitions loop back to itself,
    /// which means no word can lead from it to acceptance.
    pub fn is_sink(&self, state: StateIndex) -> bool {
        self.state(state).is_some_and(|s| {
            !s.accepting && s.edges().all(|(_, target)| target == state)
        })
    }

    /// Tries to construct a (finite) word witnessing that the accepted language is non-empty.
    /// The returned word is the length-lexicographically least accepted word, if it exists.
    pub fn give_word(&self) -> Option<String> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.is_accepting(q).then_some(word))
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Returns a string representation of the transition table of the automaton. Each row
    /// corresponds to a state, the initial state is marked by `→` and accepting states by `*`.
    /// Missing transitions are displayed as `-`.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.universe().map(|sym| sym.to_string())),
        );
        for (id, state) in self.states.iter().enumerate() {
            let mut row = vec![format!(
                "{}{}{}",
                if id == self.initial { "→" } else { "" },
                state.name,
                if state.accepting { "*" } else { "" }
            )];
            for sym in self.alphabet.universe() {
                row.push(
                    state
                        .successor(sym)
                        .map(|q| self.states[q].name.clone())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::contains_ab};

    fn partial() -> DFA {
        // accepts precisely `ab`
        TSBuilder::default()
            .with_state_colors([false, false, true])
            .with_edges([(0, 'a', 1), (1, 'b', 2)])
            .into_dfa(0)
    }

    #[test_log::test]
    fn completion_adds_single_trap() {
        let dfa = partial();
        assert!(!dfa.is_complete());
        assert_eq!(dfa.transition_count(), 2);

        let complete = dfa.complete();
        assert!(complete.is_complete());
        assert_eq!(complete.size(), 4);
        let trap = complete.find_state("trap").unwrap();
        assert!(complete.is_sink(trap));
        assert!(!complete.is_accepting(trap));
        assert_eq!(complete.successor(0, 'b'), Some(trap));
        assert_eq!(complete.successor(trap, 'a'), Some(trap));

        for word in dfa.alphabet().words_up_to(4) {
            assert_eq!(dfa.accepts(&word), complete.accepts(&word));
        }

        // completing a total automaton changes nothing
        assert_eq!(complete.complete(), complete);
        assert_eq!(contains_ab().complete(), contains_ab());
    }

    #[test]
    fn trap_name_is_unique() {
        let dfa = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 1)])
            .with_alphabet_symbols(['b'])
            .into_dfa(0)
            .renamed(|_| "trap".to_string());
        let completed = dfa.complete();
        assert_eq!(completed.size(), 3);
        assert_eq!(completed.state_name(2), Some("trap'"));
        assert_eq!(completed.find_state("trap'"), Some(2));
    }

    #[test]
    fn trim_drops_unreachable_states() {
        let dfa = TSBuilder::default()
            .with_state_colors([false, true, true, false])
            .with_edges([(0, 'a', 1), (3, 'a', 2), (2, 'a', 0)])
            .into_dfa(0);
        let trimmed = dfa.trim();
        assert_eq!(trimmed.size(), 2);
        assert_eq!(trimmed.state_name(1), Some("q1"));
        assert_eq!(trimmed.accepting_states().count(), 1);
        assert_eq!(trimmed.rejecting_states().count(), 1);
    }

    #[test]
    fn emptiness_and_witnesses() {
        assert_eq!(contains_ab().give_word(), Some("ab".to_string()));
        assert!(!partial().is_empty_language());

        let empty = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 0), (1, 'a', 0)])
            .into_dfa(0);
        assert!(empty.is_empty_language());
    }

    #[test]
    fn transition_table_rendering() {
        let table = partial().to_string();
        assert!(table.contains("State"));
        assert!(table.contains("→q0"));
        assert!(table.contains("q2*"));
        assert!(table.contains('-'));
    }
}
