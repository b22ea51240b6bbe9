//! Ledger error types.
//!
//! Only split mutations can fail. An imbalance the balancer cannot fix is not
//! an error: it is reported in `BalanceReport`.

use thiserror::Error;

use crate::amount::AmountError;

/// Errors that can occur while mutating a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A split index does not exist.
    #[error("Split index {index} out of range (transaction has {len} splits)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of splits.
        len: usize,
    },

    /// Summing split amounts overflowed.
    #[error("Split total overflow")]
    Overflow,

    /// Amount arithmetic failed.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl TransactionError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "SPLIT_INDEX_OUT_OF_RANGE",
            Self::Overflow => "SPLIT_TOTAL_OVERFLOW",
            Self::Amount(err) => err.error_code(),
        }
    }
}

impl From<TransactionError> for centime_shared::AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::IndexOutOfRange { .. } => Self::NotFound(err.to_string()),
            TransactionError::Overflow | TransactionError::Amount(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}
