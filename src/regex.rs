//! The supported syntax is small: literals, alternation `|`, Kleene star `*`, one or more
//! repetitions `+` and parentheses for grouping. Concatenation is implicit. Any other character
//! is a literal, a backslash turns the following character into a literal. Operators bind as
//! usual, postfix repetition tightest, then concatenation, then alternation.
//!
//! Compilation happens in three stages, each of which is exposed: [`tokenize`] makes
//! concatenation explicit, [`to_postfix`] applies the shunting-yard algorithm and [`compile`]
//! runs Thompson's construction on the result.

use tracing::debug;

use crate::prelude::*;

mod token;
pub use token::{tokenize, Token, OPERATOR_CHARACTERS};

mod postfix;
pub use postfix::Postfix;

mod thompson;

/// Converts the given expression into postfix notation.
///
/// # Example
/// ```
/// use regular_automata::regex;
///
/// assert_eq!(regex::to_postfix("a(b|c)d").unwrap().to_string(), "abc|.d.");
/// ```
pub fn to_postfix(expression: &str) -> Result<Postfix, RegexError> {
    Postfix::from_tokens(tokenize(expression)?)
}

/// Compiles the given expression into an [`NFA`] with epsilon moves. The empty expression
/// denotes the language that consists only of the empty word. An expression that is malformed,
/// for example because of unbalanced parentheses or an operator that lacks an operand, leads to
/// a [`RegexError`].
///
/// # Example
/// ```
/// use regular_automata::prelude::*;
///
/// let nfa = regex::compile("a(b|c)d").unwrap();
/// assert!(nfa.accepts("abd"));
/// assert!(!nfa.accepts("abcd"));
/// assert_eq!(regex::compile("(a|b"), Err(RegexError::UnclosedParenthesis));
/// ```
pub fn compile(expression: &str) -> Result<NFA, RegexError> {
    let tokens = tokenize(expression)?;
    let nfa = if tokens.is_empty() {
        thompson::empty_word()
    } else {
        thompson::thompson(&Postfix::from_tokens(tokens)?)?
    };
    debug!(
        "compiled regex {expression} into nfa with {} states",
        nfa.size()
    );
    Ok(nfa)
}
