use std::collections::VecDeque;

use tracing::debug;

use crate::{math::Set, prelude::*};

/// A state of the product of two automata. Each component is either a state of the
/// respective automaton or `None`, which stands for the implicit rejecting sink that is
/// reached whenever a partial automaton has no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductIndex(pub Option<StateIndex>, pub Option<StateIndex>);

/// The outcome of an equivalence check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Both automata accept precisely the same words.
    Equivalent,
    /// The given word is accepted by precisely one of the automata.
    Distinguished(String),
}

impl Verdict {
    /// Returns true if the verdict is [`Verdict::Equivalent`].
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Verdict::Equivalent)
    }

    /// Returns the distinguishing word, if there is one.
    pub fn witness(&self) -> Option<&str> {
        match self {
            Verdict::Equivalent => None,
            Verdict::Distinguished(word) => Some(word),
        }
    }
}

impl DFA {
    fn is_accepting_component(&self, state: Option<StateIndex>) -> bool {
        state.is_some_and(|q| self.is_accepting(q))
    }

    /// Decides whether `self` and `other` accept the same language. Both automata must be over
    /// the same alphabet, otherwise an [`EquivalenceError::AlphabetMismatch`] is returned.
    ///
    /// The check explores the product of the two automata breadth first, taking symbols in
    /// ascending order, until it finds a pair of states of which precisely one is accepting.
    /// The returned witness is thus the length-lexicographically least word on which the
    /// automata disagree. Partial automata are fine, missing transitions lead into an implicit
    /// rejecting sink. The exploration visits every pair at most once and never goes deeper
    /// than the number of pairs, so it always terminates.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let left = NFA::from_regex("a(b|c)").unwrap().determinize();
    /// let right = NFA::from_regex("ab|ac").unwrap().determinize();
    /// assert_eq!(left.equivalent(&right), Ok(Verdict::Equivalent));
    ///
    /// let other = NFA::from_regex("ab|ad").unwrap().determinize();
    /// assert!(left.equivalent(&other).is_err());
    /// ```
    pub fn equivalent(&self, other: &DFA) -> Result<Verdict, EquivalenceError> {
        if self.alphabet() != other.alphabet() {
            return Err(EquivalenceError::AlphabetMismatch {
                left: self.alphabet().clone(),
                right: other.alphabet().clone(),
            });
        }

        let bound = (self.size() + 1) * (other.size() + 1);
        let origin = ProductIndex(Some(self.initial()), Some(other.initial()));
        let mut seen = Set::from_iter([origin]);
        let mut queue = VecDeque::from([(String::new(), 0usize, origin)]);

        while let Some((word, depth, ProductIndex(left, right))) = queue.pop_front() {
            if self.is_accepting_component(left) != other.is_accepting_component(right) {
                debug!(
                    "automata are distinguished by {word} after exploring {} pairs",
                    seen.len()
                );
                return Ok(Verdict::Distinguished(word));
            }
            if depth >= bound {
                continue;
            }
            for sym in self.alphabet().universe() {
                let successor = ProductIndex(
                    left.and_then(|q| self.successor(q, sym)),
                    right.and_then(|q| other.successor(q, sym)),
                );
                if seen.insert(successor) {
                    let mut extended = word.clone();
                    extended.push(sym);
                    queue.push_back((extended, depth + 1, successor));
                }
            }
        }

        debug!("automata are equivalent, explored {} pairs", seen.len());
        Ok(Verdict::Equivalent)
    }
}
