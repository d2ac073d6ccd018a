use std::fmt::Display;

use thiserror::Error;

use crate::ast::Expression;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("line ended early, expected {expected}")]
    PrematureEndOfInput { expected: Expected },
    #[error("line {}, column {}: expected {expected}, found '{}'", .got.line, .got.column, .got.kind)]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("expected a comparison, found {0}")]
    MissingComparison(Expression),
    #[error("line nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

#[derive(Debug, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
    EndOfLine,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "'{}'", kind),
            Expected::Identifier => write!(f, "a name"),
            Expected::Expression => write!(f, "an expression"),
            Expected::EndOfLine => write!(f, "end of line"),
        }
    }
}

impl ParseError {
    pub fn premature_end_expected_expression() -> Self {
        ParseError::PrematureEndOfInput {
            expected: Expected::Expression,
        }
    }

    pub fn unexpected_token(expected: TokenKind, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken {
                expected: Expected::Token(expected),
                got,
            },
            None => ParseError::PrematureEndOfInput {
                expected: Expected::Token(expected),
            },
        }
    }

    pub fn unexpected_other(expected: Expected, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken { expected, got },
            None => ParseError::PrematureEndOfInput { expected },
        }
    }
}
