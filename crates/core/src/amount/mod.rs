//! Monetary amounts: value type, parsing and formatting.
//!
//! An [`Amount`] is an `i64` count of a currency's smallest unit. Text enters
//! through [`AmountParser`] and leaves through [`AmountFormatter`].

pub mod error;
pub mod format;
pub mod parser;
pub mod separators;
pub mod value;

#[cfg(test)]
mod props;

pub use error::{AmountError, ParseError};
pub use format::{AmountFormatter, FormatOptions, SeparatorConfig};
pub use parser::{AmountParser, ParseOptions};
pub use separators::{normalize_number, SeparatorReader};
pub use value::{is_of_currency, is_same_currency, Amount};
