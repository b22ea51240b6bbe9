//! Transactions and their splits.
//!
//! This module implements:
//! - Splits (account/amount legs)
//! - The transaction aggregate and its split mutations
//! - Per-currency balancing
//! - Transaction lists ordered by date and position

pub mod balance;
pub mod error;
pub mod list;
pub mod split;
pub mod transaction;

#[cfg(test)]
mod balance_props;

pub use balance::BalanceReport;
pub use error::TransactionError;
pub use list::TransactionList;
pub use split::Split;
pub use transaction::{Transaction, TransactionType};
