//! Amount error types.
//!
//! `AmountError` covers arithmetic between amounts; `ParseError` is the single
//! failure type of the amount parser. Neither ever carries a partial result.

use thiserror::Error;

use crate::expr::ExprError;

/// Errors raised by amount arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Both operands carry different currencies.
    #[error("Amounts of different currencies can't be combined: {left} and {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: String,
        /// Currency of the right operand.
        right: String,
    },

    /// A non-zero amount must carry a currency.
    #[error("A non-zero amount requires a currency")]
    MissingCurrency,

    /// The result does not fit in the 64-bit smallest-unit value.
    #[error("Amount overflow")]
    Overflow,

    /// Division by zero.
    #[error("Division by zero")]
    DivisionByZero,
}

impl AmountError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::MissingCurrency => "MISSING_CURRENCY",
            Self::Overflow => "AMOUNT_OVERFLOW",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
        }
    }
}

/// Reasons an amount text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    // ========== Currency Errors ==========
    /// A currency-like word does not resolve to a registered code.
    #[error("Unsupported currency: {0}")]
    UnknownCurrency(String),

    /// Two different currency codes appear in the same text.
    #[error("Conflicting currencies: {first} and {second}")]
    ConflictingCurrencies {
        /// Code found first.
        first: String,
        /// Code found second.
        second: String,
    },

    /// No currency resolved while strict currency mode is on, or a non-zero
    /// value was parsed without any currency.
    #[error("No currency could be resolved")]
    MissingCurrency,

    // ========== Lexical Errors ==========
    /// Characters that are neither numeric, operators nor a currency.
    #[error("Unexpected text: {0:?}")]
    Garbage(String),

    /// A numeric token whose separators make no sense.
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// Operators were found but expressions are disabled.
    #[error("Expressions are not allowed here")]
    ExpressionNotAllowed,

    // ========== Evaluation Errors ==========
    /// The arithmetic expression is malformed or cannot be evaluated.
    #[error(transparent)]
    Expression(#[from] ExprError),

    /// The value does not fit in 64-bit smallest units.
    #[error("Amount overflow")]
    Overflow,
}

impl ParseError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::ConflictingCurrencies { .. } => "CONFLICTING_CURRENCIES",
            Self::MissingCurrency => "MISSING_CURRENCY",
            Self::Garbage(_) => "GARBAGE",
            Self::InvalidNumber(_) => "INVALID_NUMBER",
            Self::ExpressionNotAllowed => "EXPRESSION_NOT_ALLOWED",
            Self::Expression(err) => err.error_code(),
            Self::Overflow => "AMOUNT_OVERFLOW",
        }
    }
}

impl From<AmountError> for ParseError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::MissingCurrency => Self::MissingCurrency,
            AmountError::DivisionByZero => Self::Expression(ExprError::DivisionByZero),
            AmountError::Overflow | AmountError::CurrencyMismatch { .. } => Self::Overflow,
        }
    }
}

impl From<ParseError> for centime_shared::AppError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<AmountError> for centime_shared::AppError {
    fn from(err: AmountError) -> Self {
        Self::Validation(err.to_string())
    }
}
