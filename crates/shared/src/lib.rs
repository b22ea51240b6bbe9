//! Shared configuration, errors, and identifiers for Centime.
//!
//! This crate provides common pieces used across the workspace:
//! - Engine configuration (separators, parse defaults, extra currencies)
//! - Application-wide error umbrella
//! - Typed identifiers for opaque external references

pub mod config;
pub mod error;
pub mod types;

pub use config::{CurrencyConfig, EngineConfig, FormatSettings, ParseSettings};
pub use error::{AppError, AppResult};
pub use types::AccountId;
