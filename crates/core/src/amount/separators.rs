//! Grouping versus decimal separator disambiguation.
//!
//! Users type `1,000.00`, `1.000,00`, `1 000,00` or `1'000.00` for the same
//! number. This module decides, for one numeric literal, which separator is
//! the decimal point. It is a pure function of the literal, the currency
//! exponent and the literal's role in the expression.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::expr::{ExprError, ExprResult, NumberReader, OperandRole};

/// Normalizes a raw literal into a plain `digits[.digits]` string.
///
/// Rules, in order:
/// - `'` and spaces are grouping and dropped.
/// - With both `.` and `,` present, the last separator is the decimal point
///   and every earlier one must be the other character, followed by exactly
///   three digits.
/// - With one separator character repeated, it is grouping if every group
///   after it has three digits; otherwise the last one is the decimal point.
/// - A single separator followed by exactly three digits is grouping for an
///   amount in a currency whose exponent is not 3, and the decimal point
///   otherwise. Any other single separator is the decimal point.
///
/// Returns `None` when the literal cannot be read.
#[must_use]
pub fn normalize_number(raw: &str, exponent: u32, role: OperandRole) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '\'' | ' ')).collect();

    let mut parts: Vec<&str> = Vec::new();
    let mut seps: Vec<char> = Vec::new();
    let mut start = 0;
    for (i, ch) in cleaned.char_indices() {
        match ch {
            '.' | ',' => {
                parts.push(&cleaned[start..i]);
                seps.push(ch);
                start = i + 1;
            }
            c if c.is_ascii_digit() => {}
            _ => return None,
        }
    }
    parts.push(&cleaned[start..]);

    let decimal_at = decimal_position(&parts, &seps, exponent, role)?;
    let (integer, fraction) = match decimal_at {
        Some(at) => (parts[..=at].concat(), parts[at + 1]),
        None => (parts.concat(), ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut normalized = if integer.is_empty() {
        "0".to_string()
    } else {
        integer
    };
    if !fraction.is_empty() {
        normalized.push('.');
        normalized.push_str(fraction);
    }
    Some(normalized)
}

/// Index of the separator acting as the decimal point.
///
/// Outer `None` means invalid, inner `None` means the literal is an integer.
fn decimal_position(
    parts: &[&str],
    seps: &[char],
    exponent: u32,
    role: OperandRole,
) -> Option<Option<usize>> {
    let Some(&last) = seps.last() else {
        return Some(None);
    };
    let last_at = seps.len() - 1;
    let groups_after = |i: usize| parts[i + 1].len() == 3;

    if seps.iter().any(|&c| c != last) {
        // Mixed separators: earlier ones are all the other character
        let valid = seps[..last_at]
            .iter()
            .enumerate()
            .all(|(i, &c)| c != last && groups_after(i));
        return valid.then_some(Some(last_at));
    }

    if seps.len() > 1 {
        if (0..seps.len()).all(groups_after) {
            return Some(None);
        }
        let valid = (0..last_at).all(groups_after);
        return valid.then_some(Some(last_at));
    }

    let looks_grouped = groups_after(0)
        && exponent != 3
        && role == OperandRole::Amount
        && !parts[0].is_empty();
    Some(if looks_grouped { None } else { Some(0) })
}

/// Literal reader applying [`normalize_number`] for a given exponent.
#[derive(Debug, Clone, Copy)]
pub struct SeparatorReader {
    exponent: u32,
}

impl SeparatorReader {
    /// Creates a reader for amounts with `exponent` fractional digits.
    #[must_use]
    pub const fn new(exponent: u32) -> Self {
        Self { exponent }
    }
}

impl NumberReader for SeparatorReader {
    fn read(&self, raw: &str, role: OperandRole) -> ExprResult<Decimal> {
        let normalized = normalize_number(raw, self.exponent, role)
            .ok_or_else(|| ExprError::InvalidNumber(raw.to_string()))?;
        Decimal::from_str(&normalized).map_err(|_| ExprError::InvalidNumber(raw.to_string()))
    }
}
