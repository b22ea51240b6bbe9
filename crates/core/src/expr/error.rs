//! Expression error types.

use thiserror::Error;

/// Errors raised while tokenizing, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// Nothing to evaluate.
    #[error("Empty expression")]
    Empty,

    /// A character that has no meaning in an expression.
    #[error("Unexpected character {ch:?} at position {pos}")]
    UnexpectedChar {
        /// Offending character.
        ch: char,
        /// Byte offset in the input.
        pos: usize,
    },

    /// A token in a place the grammar does not allow.
    #[error("Unexpected {0}")]
    UnexpectedToken(String),

    /// The input ended in the middle of an expression.
    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    /// Parentheses are not balanced.
    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    /// A numeric literal could not be read.
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// Division by exactly zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Intermediate result out of range.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Parentheses, signs or operators nested past the supported depth.
    #[error("Expression nested deeper than {0} levels")]
    TooDeep(usize),
}

impl ExprError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY_EXPRESSION",
            Self::UnexpectedChar { .. } => "UNEXPECTED_CHAR",
            Self::UnexpectedToken(_) => "UNEXPECTED_TOKEN",
            Self::UnexpectedEnd => "UNEXPECTED_END",
            Self::UnbalancedParens => "UNBALANCED_PARENS",
            Self::InvalidNumber(_) => "INVALID_NUMBER",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::Overflow => "ARITHMETIC_OVERFLOW",
            Self::TooDeep(_) => "EXPRESSION_TOO_DEEP",
        }
    }
}

/// Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;
