//! Currency registration errors.

use thiserror::Error;

/// Errors raised while registering a currency.
///
/// Lookups never fail with an error: an unknown code is simply `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The code is not exactly three ASCII letters.
    #[error("Invalid currency code: {0:?}")]
    InvalidCode(String),

    /// The exponent exceeds the supported number of fractional digits.
    #[error("Currency {code} exponent {exponent} exceeds the maximum of {max}")]
    ExponentTooLarge {
        /// The offending code.
        code: String,
        /// The requested exponent.
        exponent: u32,
        /// The largest supported exponent.
        max: u32,
    },
}

impl CurrencyError {
    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCode(_) => "INVALID_CURRENCY_CODE",
            Self::ExponentTooLarge { .. } => "CURRENCY_EXPONENT_TOO_LARGE",
        }
    }
}

impl From<CurrencyError> for centime_shared::AppError {
    fn from(err: CurrencyError) -> Self {
        Self::Validation(err.to_string())
    }
}
