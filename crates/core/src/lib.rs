//! Core monetary logic for Centime.
//!
//! This crate contains pure logic with ZERO I/O.
//! Amounts are fixed-point integers tagged with a currency; no floats anywhere.
//!
//! # Modules
//!
//! - `currency` - Currency registry (codes, exponents, ranks, symbols)
//! - `amount` - Amount value type, free-form parsing and formatting
//! - `expr` - Arithmetic expression parser and evaluator
//! - `ledger` - Splits, transactions and per-currency balancing
//! - `global` - Process-wide registry and separator configuration

pub mod amount;
pub mod currency;
pub mod expr;
pub mod global;
pub mod ledger;

pub use amount::{Amount, AmountError, AmountFormatter, AmountParser, FormatOptions, ParseError, ParseOptions, SeparatorConfig};
pub use currency::{Currency, CurrencyError, CurrencyRegistry};
pub use ledger::{BalanceReport, Split, Transaction, TransactionError, TransactionList, TransactionType};
