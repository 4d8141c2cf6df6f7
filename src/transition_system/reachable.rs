use crate::{math::Set, prelude::*};
use std::collections::VecDeque;

/// Type alias for a minimal representative of a state which is its length-lexicographically
/// minimal access sequence and its state index.
pub type MinimalRepresentative = (String, StateIndex);

/// Struct that can return the minimal representatives of a [`DFA`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from a given origin. States are produced in the order in which a breadth-first search that
/// explores symbols in ascending order discovers them, which is the canonical numbering used
/// throughout the crate.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a DFA,
    seen: Set<StateIndex>,
    queue: VecDeque<MinimalRepresentative>,
}

#[allow(missing_docs)]
impl<'a> MinimalRepresentatives<'a> {
    pub fn new(dfa: &'a DFA, origin: StateIndex) -> Self {
        let seen = Set::from_iter([origin]);
        let queue = [(String::new(), origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        if let Some(state) = self.dfa.state(q) {
            for (sym, p) in state.edges() {
                if self.seen.insert(p) {
                    let mut new_access = access.clone();
                    new_access.push(sym);
                    self.queue.push_back((new_access, p));
                }
            }
        }
        Some((access, q))
    }
}

impl DFA {
    /// Returns an iterator over the minimal representatives of all states that are reachable
    /// from the initial state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        self.minimal_representatives_from(self.initial())
    }

    /// Returns an iterator over the minimal representatives of all states that are reachable
    /// from `origin`.
    pub fn minimal_representatives_from(&self, origin: StateIndex) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, origin)
    }

    /// Iterates over the indices of all states reachable from the initial state in the order
    /// of discovery.
    pub fn reachable_state_indices(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.reachable_state_indices_from(self.initial())
    }

    /// Iterates over the indices of all states reachable from `origin` in the order of
    /// discovery.
    pub fn reachable_state_indices_from(
        &self,
        origin: StateIndex,
    ) -> impl Iterator<Item = StateIndex> + '_ {
        self.minimal_representatives_from(origin).map(|(_, q)| q)
    }
}
