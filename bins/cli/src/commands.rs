//! Command execution.

use std::fmt::Write as _;

use centime_core::global;
use centime_core::{
    Amount, AmountFormatter, AmountParser, Currency, CurrencyRegistry, FormatOptions,
    ParseOptions, Split, Transaction, TransactionType,
};
use centime_shared::{AccountId, AppError, EngineConfig};
use chrono::Utc;
use tracing::{debug, info};

use crate::args::{Command, USAGE};

/// Registers configured currencies and applies configured separators.
///
/// # Errors
///
/// Returns `AppError::Validation` for an invalid configured currency.
pub fn apply_config(config: &EngineConfig, registry: &CurrencyRegistry) -> Result<(), AppError> {
    for entry in &config.currencies {
        let mut currency = Currency::new(&entry.code, entry.exponent)?.with_priority(entry.priority);
        if let Some(name) = &entry.name {
            currency = currency.with_name(name.clone());
        }
        if let Some(symbol) = &entry.symbol {
            currency = currency.with_symbol(symbol.clone());
        }
        registry.register(currency);
    }
    global::amount_configure(config.format.decimal_sep, config.format.grouping_sep);
    info!(
        currencies = registry.len(),
        decimal_sep = %config.format.decimal_sep,
        grouping_sep = %config.format.grouping_sep,
        "Engine configured"
    );
    Ok(())
}

/// Runs `command` and returns what to print.
///
/// # Errors
///
/// Returns the `AppError` matching the failure.
pub fn execute(
    command: Command,
    config: &EngineConfig,
    registry: &CurrencyRegistry,
) -> Result<String, AppError> {
    let parser = AmountParser::new(registry);
    let formatter = AmountFormatter::new(global::separators());
    let display = FormatOptions {
        show_currency: config.format.show_currency,
        blank_if_zero: config.format.blank_if_zero,
        ..FormatOptions::default()
    };

    match command {
        Command::Help => Ok(USAGE.to_string()),
        Command::Parse {
            text,
            currency,
            auto_decimal,
            strict,
            json,
        } => {
            let options = ParseOptions {
                default_currency: currency.or_else(|| config.parse.default_currency.clone()),
                auto_decimal_place: auto_decimal || config.parse.auto_decimal_place,
                strict_currency: strict || config.parse.strict_currency,
                ..ParseOptions::default()
            };
            let amount = parser.parse(&text, &options)?;
            debug!(text, val = amount.val(), "Parsed");
            if json {
                to_json(&amount)
            } else {
                Ok(formatter.format_with(&amount, &display))
            }
        }
        Command::Format {
            val,
            currency,
            no_currency,
            blank_zero,
        } => {
            let amount = match currency {
                Some(code) => {
                    let currency = registry
                        .get(&code)
                        .ok_or_else(|| AppError::NotFound(format!("currency {code}")))?;
                    Amount::new(val, currency)
                }
                None if val == 0 => Amount::zero(),
                None => {
                    return Err(AppError::Validation(
                        "a non-zero value needs a currency".to_string(),
                    ));
                }
            };
            Ok(formatter.format(&amount, !no_currency, blank_zero))
        }
        Command::Balance {
            amounts,
            currency,
            json,
        } => {
            let options = ParseOptions {
                default_currency: currency.or_else(|| config.parse.default_currency.clone()),
                ..ParseOptions::default()
            };
            let mut txn = Transaction::new(TransactionType::Normal, Utc::now().date_naive());
            for text in &amounts {
                let amount = parser.parse(text, &options)?;
                txn.push_split(Split::new(Some(AccountId::new()), amount));
            }
            let report = txn.balance_currencies(None)?;
            txn.touch();

            if json {
                return to_json(&serde_json::json!({
                    "transaction": txn,
                    "report": report,
                }));
            }
            let mut out = String::new();
            for split in txn.splits() {
                let marker = if report.added.contains(&split.index()) { "+" } else { " " };
                let _ = writeln!(out, "{marker} {}", formatter.format(split.amount(), true, false));
            }
            for imbalance in &report.logical_imbalances {
                let _ = writeln!(
                    out,
                    "! unbalanced {}",
                    formatter.format(imbalance, true, false)
                );
            }
            Ok(out.trim_end().to_string())
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Internal(err.to_string()))
}
