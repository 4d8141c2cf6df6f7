use std::fmt::Display;

use crate::{alphabet::Symbol, prelude::*};

/// The characters that have a special meaning in a regular expression. Preceding any of them
/// with a backslash turns it into a literal.
pub const OPERATOR_CHARACTERS: [char; 6] = ['|', '*', '+', '(', ')', '\\'];

/// A token of a regular expression. Concatenation never appears in the input, it is
/// inserted by [`tokenize`] wherever two operands are adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A symbol that matches itself.
    Literal(Symbol),
    /// Alternation, written `|`.
    Union,
    /// Concatenation, displayed as `.`.
    Concat,
    /// Zero or more repetitions, written `*`.
    Star,
    /// One or more repetitions, written `+`.
    Plus,
    /// Opening parenthesis.
    Open,
    /// Closing parenthesis.
    Close,
}

impl Token {
    /// Binding strength of the operator, larger values bind tighter. Parentheses and
    /// literals have precedence zero.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Union => 1,
            Token::Concat => 2,
            Token::Star | Token::Plus => 3,
            Token::Literal(_) | Token::Open | Token::Close => 0,
        }
    }

    /// The character that denotes the operator, concatenation uses `.`.
    pub fn operator_char(&self) -> Option<char> {
        match self {
            Token::Union => Some('|'),
            Token::Concat => Some('.'),
            Token::Star => Some('*'),
            Token::Plus => Some('+'),
            Token::Literal(_) | Token::Open | Token::Close => None,
        }
    }

    fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Literal(_) | Token::Close | Token::Star | Token::Plus
        )
    }

    fn begins_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::Open)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Literal(sym) if OPERATOR_CHARACTERS.contains(sym) || *sym == '.' => {
                write!(f, "\\{sym}")
            }
            Token::Literal(sym) => write!(f, "{sym}"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            operator => match operator.operator_char() {
                Some(c) => write!(f, "{c}"),
                None => Ok(()),
            },
        }
    }
}

/// Splits a regular expression into tokens and makes concatenation explicit. A backslash
/// turns the following character into a [`Token::Literal`], every other character that is
/// not an operator or a parenthesis is a literal as well. A [`Token::Concat`] is inserted
/// between two adjacent tokens whenever the first ends an operand (a literal, `)`, `*` or
/// `+`) and the second begins one (a literal or `(`).
///
/// # Example
/// ```
/// use regular_automata::regex::{tokenize, Token};
///
/// assert_eq!(
///     tokenize("a\\*b").unwrap(),
///     vec![
///         Token::Literal('a'),
///         Token::Concat,
///         Token::Literal('*'),
///         Token::Concat,
///         Token::Literal('b'),
///     ]
/// );
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, RegexError> {
    let mut tokens: Vec<Token> = Vec::with_capacity(2 * expression.len());
    let mut chars = expression.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '\\' => Token::Literal(chars.next().ok_or(RegexError::DanglingEscape)?),
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '(' => Token::Open,
            ')' => Token::Close,
            sym => Token::Literal(sym),
        };
        if tokens.last().is_some_and(Token::ends_operand) && token.begins_operand() {
            tokens.push(Token::Concat);
        }
        tokens.push(token);
    }
    Ok(tokens)
}
