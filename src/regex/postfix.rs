use std::fmt::Display;

use itertools::Itertools;

use super::Token;
use crate::prelude::*;

/// A regular expression in postfix (reverse Polish) notation. It consists only of literals
/// and operators, parentheses have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Postfix(Vec<Token>);

impl std::ops::Deref for Postfix {
    type Target = [Token];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(""))
    }
}

impl Postfix {
    /// Converts a sequence of tokens with explicit concatenation into postfix notation
    /// through the shunting-yard algorithm. All operators are left associative, `*` and `+`
    /// bind tighter than concatenation, which binds tighter than `|`.
    pub fn from_tokens<I: IntoIterator<Item = Token>>(tokens: I) -> Result<Self, RegexError> {
        let tokens = tokens.into_iter();
        let mut operator_stack: Vec<Token> = Vec::with_capacity(tokens.size_hint().0);
        let mut output_stack: Vec<Token> = Vec::with_capacity(tokens.size_hint().0);

        for token in tokens {
            match token {
                Token::Literal(_) => output_stack.push(token),

                Token::Open => operator_stack.push(token),

                Token::Close => loop {
                    match operator_stack.pop() {
                        // matching parenthesis found, it is discarded
                        Some(Token::Open) => break,
                        Some(operator) => output_stack.push(operator),
                        None => return Err(RegexError::UnmatchedClosingParenthesis),
                    }
                },

                operator => {
                    while let Some(next_operator) = operator_stack.last() {
                        if next_operator.precedence() >= operator.precedence() {
                            output_stack.extend(operator_stack.pop());
                        } else {
                            break;
                        }
                    }
                    operator_stack.push(operator);
                }
            }
        }

        while let Some(token) = operator_stack.pop() {
            if token == Token::Open {
                return Err(RegexError::UnclosedParenthesis);
            }
            output_stack.push(token);
        }

        Ok(Self(output_stack))
    }
}
