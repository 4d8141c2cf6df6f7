//! Library for constructing and optimizing finite automata over finite words in Rust.
//!
//! The central objects are the nondeterministic automaton [`NFA`] and the deterministic automaton [`DFA`].
//! Both are immutable values once built: every operation that transforms an automaton, be it determinization,
//! completion, trimming or minimization, returns a new automaton and leaves the original untouched. This makes
//! it possible to keep an automaton around and compare it against the result of an operation, which is exactly
//! what the equivalence check is for.
//!
//! The typical pipeline looks as follows
//! - a regular expression is compiled with [`regex::compile`] into an [`NFA`] through Thompson's construction,
//! - the [`NFA`] is turned into a [`DFA`] through the subset construction ([`NFA::determinize`]),
//! - the [`DFA`] is minimized with either Hopcroft's algorithm or the table-filling algorithm ([`DFA::minimize_with`]),
//! - the result is run on inputs ([`DFA::run`]) or compared against another [`DFA`] ([`DFA::equivalent`]).
//!
//! Automata can also be created directly, either through the [`TSBuilder`], which takes lists of edges and state
//! colors, or from a normalized [`automaton::TransitionTable`] (respectively [`automaton::NfaTransitionTable`]) as
//! produced by some external loader.
//!
//! Simulating an automaton never fails: symbols that do not belong to the alphabet of an automaton simply lead
//! to rejection. The only errors are malformed regular expressions ([`RegexError`]), invalid transition tables
//! ([`TableError`]) and comparisons of automata over different alphabets ([`EquivalenceError`]).
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use regular_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "minimize")]
    pub use super::minimization::{MinimizationAlgorithm, Minimized, Refinement};
    pub use super::{
        alphabet::{CharAlphabet, Symbol},
        automaton::{
            DfaState, NfaState, NfaTableRow, NfaTransitionTable, TableRow, TransitionTable, DFA,
            NFA,
        },
        error::{EquivalenceError, RegexError, TableError},
        math,
        math::{OrderedSet, Partition},
        regex,
        transition_system::{
            operations::{ProductIndex, Verdict},
            reachable::MinimalRepresentative,
            run::{FiniteRun, NondeterministicRun},
            StateIndex, TSBuilder,
        },
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::CharAlphabet;

/// Defines the error types that operations of this crate can produce.
pub mod error;
pub use error::{EquivalenceError, RegexError, TableError};

/// Defines the concrete automata, [`NFA`] and [`DFA`], as well as the normalized transition tables
/// that can be turned into a [`DFA`].
pub mod automaton;
pub use automaton::{DFA, NFA};

/// This module defines construction and traversal of automata, runs on finite words and the
/// operations (subset construction, quotient, product) that produce new automata from existing ones.
pub mod transition_system;
pub use transition_system::TSBuilder;

/// Compiles regular expressions into nondeterministic automata.
pub mod regex;

/// Contains implementations different minimization algorithms. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state index that should be
    /// for example q0, q1, q2, ... and for a word it should be the concatenation of its symbols.
    /// This is mainly used for debugging and logging purposes.
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of states this should be {q0, q1, q2, ...}.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
    {
        format!(
            "\"{}\"",
            iter.into_iter().map(|sym| sym.to_string()).join("")
        )
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for math::OrderedSet<S> {
    fn show(&self) -> String {
        format!("{{{}}}", self.iter().map(|x| x.show()).join(", "))
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// The DFA from the wikipedia article on DFA minimization. States 2, 3 and 4 are equivalent,
    /// as are states 0 and 1.
    pub fn wiki_dfa() -> DFA {
        TSBuilder::default()
            .with_state_colors([false, false, true, true, true, false])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 0),
                (1, 'b', 3),
                (2, 'a', 4),
                (2, 'b', 5),
                (3, 'a', 4),
                (3, 'b', 5),
                (4, 'a', 4),
                (4, 'b', 5),
                (5, 'a', 5),
                (5, 'b', 5),
            ])
            .into_dfa(0)
    }

    /// Accepts all words over `{a, b}` that contain `ab` as an infix.
    pub fn contains_ab() -> DFA {
        TSBuilder::default()
            .with_state_colors([false, false, true])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 0),
                (1, 'a', 1),
                (1, 'b', 2),
                (2, 'a', 2),
                (2, 'b', 2),
            ])
            .into_dfa(0)
    }

    #[test]
    fn show_collections() {
        assert_eq!(vec!['a', 'b'].show(), "\"ab\"");
        assert_eq!(vec![0usize, 3].show(), "{0, 3}");
        assert_eq!(OrderedSet::from_iter([2usize, 1]).show(), "{1, 2}");
        assert_eq!((1usize, 'a').show(), "(1, a)");
    }

    #[cfg(feature = "minimize")]
    #[test_log::test]
    fn regex_to_minimal_dfa_pipeline() {
        let nfa = regex::compile("(a|b)*abb").unwrap();
        let dfa = nfa.determinize();
        let minimal = dfa.minimize();

        // the textbook minimal automaton for (a|b)*abb has four states
        assert_eq!(minimal.size(), 4);
        assert_eq!(dfa.equivalent(&minimal), Ok(Verdict::Equivalent));

        for word in minimal.alphabet().words_up_to(6) {
            assert_eq!(nfa.accepts(&word), minimal.accepts(&word), "{word}");
            assert_eq!(word.ends_with("abb"), minimal.accepts(&word), "{word}");
        }
    }
}
