use crate::symbols::Operator;
use itertools::Itertools;
use log::debug;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Operand(char),
    Operator(Operator),
}

impl Token {
    pub const fn symbol(self) -> char {
        match self {
            Self::Operand(c) => c,
            Self::Operator(op) => op.symbol(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected ')' at position {position}")]
    UnbalancedClose { position: usize },
    #[error("unbalanced parentheses: {open} opened, {close} closed")]
    UnbalancedOpen { open: usize, close: usize },
    #[error("unexpected symbol '{symbol}' at position {position}")]
    UnexpectedSymbol { symbol: char, position: usize },
}

/// Entries of the converter's operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Open,
    Operator(Operator),
}

impl Pending {
    const fn precedence(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Operator(op) => op.precedence(),
        }
    }
}

/// An expression in postfix (reverse Polish) order.
///
/// Only parenthesis balance is validated while converting; operator arity is
/// checked when the stream is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<Token>,
}

impl Postfix {
    /// Converts an infix expression with the shunting-yard algorithm.
    ///
    /// Operators of equal precedence are emitted left to right. Whitespace is skipped.
    pub fn parse(expression: &str) -> Result<Self, ParseError> {
        let mut tokens = Vec::with_capacity(expression.len());
        let mut stack: Vec<Pending> = Vec::new();
        let mut open = 0usize;
        let mut close = 0usize;

        for (position, c) in expression.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            } else if c.is_alphanumeric() {
                tokens.push(Token::Operand(c));
            } else if c == '(' {
                stack.push(Pending::Open);
                open += 1;
            } else if c == ')' {
                if open <= close {
                    return Err(ParseError::UnbalancedClose { position });
                }

                while let Some(Pending::Operator(op)) = stack.last().copied() {
                    tokens.push(Token::Operator(op));
                    stack.pop();
                }
                // the matching '('
                stack.pop();
                close += 1;
            } else {
                let op = Operator::from_symbol(c)
                    .ok_or(ParseError::UnexpectedSymbol { symbol: c, position })?;

                while let Some(top) = stack.last().copied() {
                    match top {
                        Pending::Operator(prev) if top.precedence() >= op.precedence() => {
                            tokens.push(Token::Operator(prev));
                            stack.pop();
                        }
                        _ => break,
                    }
                }
                stack.push(Pending::Operator(op));
            }
        }

        while let Some(top) = stack.pop() {
            if let Pending::Operator(op) = top {
                tokens.push(Token::Operator(op));
            }
        }

        if open != close {
            return Err(ParseError::UnbalancedOpen { open, close });
        }

        let postfix = Self { tokens };
        debug!("parse({:?}) -> {}", expression, postfix);
        Ok(postfix)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Distinct variable letters in ascending order.
    ///
    /// The position of a letter in this list is its bit position in a row index,
    /// most significant first.
    pub fn operands(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Operand(c) if c.is_alphabetic() => Some(*c),
                _ => None,
            })
            .sorted()
            .dedup()
            .collect()
    }
}

impl Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens
            .iter()
            .try_for_each(|t| write!(f, "{}", t.symbol()))
    }
}

impl FromStr for Postfix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
