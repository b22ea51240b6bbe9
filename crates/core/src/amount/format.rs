//! Amount rendering.

use serde::{Deserialize, Serialize};

use super::value::Amount;

/// Decimal and grouping separators used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorConfig {
    /// Separator between the integer and fractional parts.
    pub decimal_sep: char,
    /// Separator between groups of three integer digits.
    pub grouping_sep: char,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            decimal_sep: '.',
            grouping_sep: ',',
        }
    }
}

/// Per-call display switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefix the currency code.
    pub show_currency: bool,
    /// Render zero as an empty string.
    pub blank_if_zero: bool,
    /// Code that is implied and therefore not shown.
    pub default_currency: Option<String>,
    /// Code shown for a zero amount that carries no currency.
    pub zero_currency: Option<String>,
}

/// Renders amounts with a fixed separator configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountFormatter {
    separators: SeparatorConfig,
}

impl AmountFormatter {
    /// Creates a formatter using `separators`.
    #[must_use]
    pub const fn new(separators: SeparatorConfig) -> Self {
        Self { separators }
    }

    /// Creates a formatter from the two separator characters.
    #[must_use]
    pub const fn with_separators(decimal_sep: char, grouping_sep: char) -> Self {
        Self::new(SeparatorConfig {
            decimal_sep,
            grouping_sep,
        })
    }

    /// The separator configuration.
    #[must_use]
    pub const fn separators(&self) -> SeparatorConfig {
        self.separators
    }

    /// Renders `amount`, e.g. `USD 1,234.56`.
    #[must_use]
    pub fn format(&self, amount: &Amount, show_currency: bool, blank_if_zero: bool) -> String {
        self.format_with(
            amount,
            &FormatOptions {
                show_currency,
                blank_if_zero,
                ..FormatOptions::default()
            },
        )
    }

    /// Renders `amount` with the full set of display options.
    #[must_use]
    pub fn format_with(&self, amount: &Amount, options: &FormatOptions) -> String {
        if options.blank_if_zero && amount.is_zero() {
            return String::new();
        }

        let mut out = String::new();
        if options.show_currency {
            if let Some(code) = displayed_code(amount, options) {
                out.push_str(code);
                out.push(' ');
            }
        }
        if amount.is_negative() {
            out.push('-');
        }
        out.push_str(&self.format_number(amount.val().unsigned_abs(), amount.exponent()));
        out
    }

    /// Renders an unsigned smallest-unit value with `exponent` fractional digits.
    fn format_number(&self, units: u64, exponent: u32) -> String {
        let exponent = exponent as usize;
        let mut digits = units.to_string();
        if digits.len() <= exponent {
            digits = format!("{digits:0>width$}", width = exponent + 1);
        }
        let (integer, fraction) = digits.split_at(digits.len() - exponent);

        let mut out = group_digits(integer, self.separators.grouping_sep);
        if exponent > 0 {
            out.push(self.separators.decimal_sep);
            out.push_str(fraction);
        }
        out
    }
}

fn displayed_code<'a>(amount: &'a Amount, options: &'a FormatOptions) -> Option<&'a str> {
    let default = options.default_currency.as_deref();
    match amount.currency_code() {
        Some(code) => (Some(code) != default).then_some(code),
        None => options
            .zero_currency
            .as_deref()
            .filter(|&zero| Some(zero) != default),
    }
}

/// Inserts `sep` every three digits from the right.
fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(sep);
        }
    }
    out
}
