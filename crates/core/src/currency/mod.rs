//! Currency registry.
//!
//! Currencies are registered once (at startup or on demand) and never mutated
//! afterwards. Amounts hold a shared snapshot of the record they were created
//! with.

pub mod error;
pub mod registry;

#[cfg(test)]
mod props;

pub use error::CurrencyError;
pub use registry::{Currency, CurrencyRegistry, DEFAULT_EXPONENT, MAX_EXPONENT};
