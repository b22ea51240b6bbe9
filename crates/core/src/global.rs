//! Process-wide entry points.
//!
//! Thin wrappers over the global [`CurrencyRegistry`] and a global separator
//! configuration, for callers that do not thread explicit instances around.
//! Separators are stored atomically; a reconfiguration is visible to every
//! later `amount_format` call.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::amount::{Amount, AmountFormatter, AmountParser, ParseError, ParseOptions, SeparatorConfig};
use crate::currency::{Currency, CurrencyError, CurrencyRegistry};

static DECIMAL_SEP: AtomicU32 = AtomicU32::new('.' as u32);
static GROUPING_SEP: AtomicU32 = AtomicU32::new(',' as u32);

/// Registers (or replaces) a currency in the global registry.
///
/// # Errors
///
/// Returns a [`CurrencyError`] for an invalid code or exponent.
pub fn currency_register(
    code: &str,
    exponent: u32,
    priority: u32,
) -> Result<Arc<Currency>, CurrencyError> {
    let currency = Currency::new(code, exponent)?.with_priority(priority);
    Ok(CurrencyRegistry::global().register(currency))
}

/// Looks up a currency in the global registry.
#[must_use]
pub fn currency_get(code: &str) -> Option<Arc<Currency>> {
    CurrencyRegistry::global().get(code)
}

/// Parses `text` against the global registry.
///
/// # Errors
///
/// See [`AmountParser::parse`].
pub fn amount_parse(
    text: &str,
    default_currency: Option<&str>,
    auto_decimal_place: bool,
    strict_currency: bool,
) -> Result<Amount, ParseError> {
    let options = ParseOptions {
        default_currency: default_currency.map(str::to_string),
        auto_decimal_place,
        strict_currency,
        ..ParseOptions::default()
    };
    AmountParser::new(CurrencyRegistry::global()).parse(text, &options)
}

/// Renders `amount` with the global separators.
#[must_use]
pub fn amount_format(amount: &Amount, show_currency: bool, blank_if_zero: bool) -> String {
    formatter().format(amount, show_currency, blank_if_zero)
}

/// Sets the global separators used by [`amount_format`].
pub fn amount_configure(decimal_sep: char, grouping_sep: char) {
    debug!(?decimal_sep, ?grouping_sep, "Configuring separators");
    DECIMAL_SEP.store(u32::from(decimal_sep), Ordering::Relaxed);
    GROUPING_SEP.store(u32::from(grouping_sep), Ordering::Relaxed);
}

/// The current global separator configuration.
#[must_use]
pub fn separators() -> SeparatorConfig {
    let load = |cell: &AtomicU32, fallback: char| {
        char::from_u32(cell.load(Ordering::Relaxed)).unwrap_or(fallback)
    };
    SeparatorConfig {
        decimal_sep: load(&DECIMAL_SEP, '.'),
        grouping_sep: load(&GROUPING_SEP, ','),
    }
}

/// A formatter using the current global separators.
#[must_use]
pub fn formatter() -> AmountFormatter {
    AmountFormatter::new(separators())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Global state is shared across the test binary; keep every check in one
    // test so they run sequentially.
    #[test]
    fn test_global_facade() {
        let usd = currency_get("usd").unwrap();
        assert_eq!(usd.code, "USD");
        assert!(currency_get("QQQ").is_none());

        let bhd = currency_register("BHD", 3, 50).unwrap();
        assert_eq!(bhd.priority, 50);
        assert_eq!(currency_get("bhd").unwrap().exponent, 3);
        assert!(currency_register("BH", 3, 50).is_err());

        let amount = amount_parse("1,454,67", Some("USD"), false, false).unwrap();
        assert_eq!(amount.val(), 145_467);
        assert_eq!(amount_parse("1 / 2 CAD", None, false, false).unwrap().val(), 50);
        assert!(amount_parse("42/0", None, false, false).is_err());
        assert!(amount_parse("ZZZ 42", Some("USD"), false, true).is_err());

        amount_configure('.', ',');
        let amount = Amount::new(3300, usd);
        assert_eq!(amount_format(&amount, true, false), "USD 33.00");

        amount_configure(',', '.');
        let amount = amount_parse("1234.99 USD", None, false, false).unwrap();
        assert_eq!(amount_format(&amount, false, false), "1.234,99");
        assert_eq!(separators().decimal_sep, ',');

        let jpy = currency_register("JPY", 3, 100).unwrap();
        amount_configure('.', ',');
        assert_eq!(amount_format(&Amount::new(12345, jpy), true, false), "JPY 12.345");
    }
}
