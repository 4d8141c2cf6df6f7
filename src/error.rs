use thiserror::Error;

use crate::alphabet::CharAlphabet;

/// Abstracts the ways in which a regular expression can be malformed. Every variant is a
/// `MalformedRegex` in the sense that the expression cannot be compiled, the variants only
/// differ in the reason.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RegexError {
    /// A `)` was encountered for which no matching `(` exists.
    #[error("malformed regex: unmatched `)`")]
    UnmatchedClosingParenthesis,
    /// The expression ended while a `(` was still open.
    #[error("malformed regex: unclosed `(`")]
    UnclosedParenthesis,
    /// An operator did not find as many operands as its arity requires.
    #[error("malformed regex: operator `{0}` is missing an operand")]
    MissingOperand(char),
    /// The expression ends in a `\` that does not escape anything.
    #[error("malformed regex: dangling escape at the end of the expression")]
    DanglingEscape,
    /// After processing the whole expression, not exactly one automaton fragment remained,
    /// for example because the expression was `()`.
    #[error("malformed regex: expected a single expression, found {0} fragments")]
    LeftoverFragments(usize),
}

/// Errors that occur when deciding equivalence of two automata.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EquivalenceError {
    /// The automata are over different alphabets, which is distinct from them recognizing
    /// different languages.
    #[error("cannot compare automata over different alphabets {left} and {right}")]
    AlphabetMismatch {
        /// The alphabet of the left automaton.
        left: CharAlphabet,
        /// The alphabet of the right automaton.
        right: CharAlphabet,
    },
}

/// Errors that can occur when turning a [`crate::automaton::TransitionTable`] into a [`crate::DFA`]
/// or a [`crate::automaton::NfaTransitionTable`] into a [`crate::NFA`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TableError {
    /// The table has no rows, so there is no initial state.
    #[error("transition table has no states")]
    Empty,
    /// A symbol appears more than once in the header of the table.
    #[error("symbol `{0}` appears more than once in the alphabet")]
    DuplicateSymbol(char),
    /// Two rows carry the same state name.
    #[error("state `{0}` is defined more than once")]
    DuplicateState(String),
    /// A transition leads to a state that has no row.
    #[error("state `{state}` has a transition on `{symbol}` to unknown state `{target}`")]
    UnknownTarget {
        /// The state in whose row the transition appears.
        state: String,
        /// The symbol of the transition.
        symbol: char,
        /// The name of the state that does not exist.
        target: String,
    },
    /// An epsilon move leads to a state that has no row.
    #[error("state `{state}` has an epsilon move to unknown state `{target}`")]
    UnknownEpsilonTarget {
        /// The state in whose row the epsilon move appears.
        state: String,
        /// The name of the state that does not exist.
        target: String,
    },
    /// A row has a different number of targets than the alphabet has symbols.
    #[error("row of state `{state}` has {found} targets, but the alphabet has {expected} symbols")]
    RowWidth {
        /// The state whose row is malformed.
        state: String,
        /// The number of symbols in the alphabet.
        expected: usize,
        /// The number of targets in the row.
        found: usize,
    },
}
