use super::{Postfix, Token};
use crate::{alphabet::Symbol, prelude::*};

/// A partially built automaton for a subexpression. It has a unique entry `start` and a unique
/// final state `end` that has no outgoing transitions yet.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateIndex,
    end: StateIndex,
}

/// Assembles fragments inside one shared arena.
struct Thompson {
    nfa: NFA,
    fragments: Vec<Fragment>,
}

impl Thompson {
    fn new() -> Self {
        Self {
            nfa: NFA::empty(),
            fragments: vec![],
        }
    }

    fn fresh(&mut self) -> Fragment {
        Fragment {
            start: self.nfa.add_state(false),
            end: self.nfa.add_state(true),
        }
    }

    fn pop(&mut self, operator: Token) -> Result<Fragment, RegexError> {
        self.fragments
            .pop()
            .ok_or(RegexError::MissingOperand(operator.operator_char().unwrap_or('?')))
    }

    /// Makes `fragment.end` non-final and links it to `target` with an epsilon move.
    fn link(&mut self, fragment: Fragment, target: StateIndex) {
        self.nfa.set_final(fragment.end, false);
        self.nfa.add_epsilon(fragment.end, target);
    }

    fn literal(&mut self, symbol: Symbol) {
        let fragment = self.fresh();
        self.nfa.add_transition(fragment.start, symbol, fragment.end);
        self.fragments.push(fragment);
    }

    fn epsilon(&mut self) {
        let fragment = self.fresh();
        self.nfa.add_epsilon(fragment.start, fragment.end);
        self.fragments.push(fragment);
    }

    fn concat(&mut self) -> Result<(), RegexError> {
        let second = self.pop(Token::Concat)?;
        let first = self.pop(Token::Concat)?;
        self.link(first, second.start);
        self.fragments.push(Fragment {
            start: first.start,
            end: second.end,
        });
        Ok(())
    }

    fn union(&mut self) -> Result<(), RegexError> {
        let second = self.pop(Token::Union)?;
        let first = self.pop(Token::Union)?;
        let fragment = self.fresh();
        self.nfa.add_epsilon(fragment.start, first.start);
        self.nfa.add_epsilon(fragment.start, second.start);
        self.link(first, fragment.end);
        self.link(second, fragment.end);
        self.fragments.push(fragment);
        Ok(())
    }

    /// Kleene star if `allow_empty` holds, otherwise one or more repetitions.
    fn repeat(&mut self, operator: Token, allow_empty: bool) -> Result<(), RegexError> {
        let inner = self.pop(operator)?;
        let fragment = self.fresh();
        self.nfa.add_epsilon(fragment.start, inner.start);
        if allow_empty {
            self.nfa.add_epsilon(fragment.start, fragment.end);
        }
        self.link(inner, inner.start);
        self.nfa.add_epsilon(inner.end, fragment.end);
        self.fragments.push(fragment);
        Ok(())
    }

    fn finish(mut self) -> Result<NFA, RegexError> {
        if let [fragment] = self.fragments[..] {
            self.nfa.set_initial(fragment.start);
            Ok(self.nfa)
        } else {
            Err(RegexError::LeftoverFragments(self.fragments.len()))
        }
    }
}

/// Builds an [`NFA`] from an expression in postfix notation through Thompson's construction.
/// Every fragment has exactly one final state, the result has exactly one final state as
/// well.
pub(super) fn thompson(postfix: &Postfix) -> Result<NFA, RegexError> {
    let mut builder = Thompson::new();
    for token in postfix.iter() {
        match *token {
            Token::Literal(symbol) => builder.literal(symbol),
            Token::Concat => builder.concat()?,
            Token::Union => builder.union()?,
            Token::Star => builder.repeat(Token::Star, true)?,
            Token::Plus => builder.repeat(Token::Plus, false)?,
            Token::Open | Token::Close => {
                unreachable!("parentheses are resolved by the conversion to postfix")
            }
        }
    }
    builder.finish()
}

/// Builds the automaton that accepts only the empty word.
pub(super) fn empty_word() -> NFA {
    let mut builder = Thompson::new();
    builder.epsilon();
    builder.nfa.set_initial(0);
    builder.nfa
}
