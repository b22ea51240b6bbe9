//! The fixed-point amount value type.
//!
//! CRITICAL: values are integers in the currency's smallest unit. Decimals are
//! only used transiently and are always rounded back with banker's rounding.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::error::AmountError;
use crate::currency::{Currency, DEFAULT_EXPONENT};

/// An integer quantity of a currency's smallest unit.
///
/// An amount without currency is always zero. Amounts are plain values:
/// cloning only bumps the shared currency record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Amount {
    val: i64,
    #[serde(serialize_with = "serialize_currency")]
    currency: Option<Arc<Currency>>,
}

fn serialize_currency<S>(currency: &Option<Arc<Currency>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match currency {
        Some(currency) => serializer.serialize_some(&currency.code),
        None => serializer.serialize_none(),
    }
}

/// Scales `value` (in whole units) to smallest units with banker's rounding.
pub(crate) fn to_smallest_units(value: Decimal, exponent: u32) -> Option<i64> {
    let factor = Decimal::from(10i64.checked_pow(exponent)?);
    value
        .checked_mul(factor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
}

impl Amount {
    /// Creates an amount of `val` smallest units of `currency`.
    #[must_use]
    pub fn new(val: i64, currency: Arc<Currency>) -> Self {
        Self {
            val,
            currency: Some(currency),
        }
    }

    /// The dimensionless zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            val: 0,
            currency: None,
        }
    }

    /// Zero in `currency`.
    #[must_use]
    pub fn zero_of(currency: Arc<Currency>) -> Self {
        Self::new(0, currency)
    }

    /// Builds an amount from a value in whole units, rounding once.
    pub fn from_decimal(
        value: Decimal,
        currency: Option<Arc<Currency>>,
    ) -> Result<Self, AmountError> {
        let exponent = currency.as_ref().map_or(DEFAULT_EXPONENT, |c| c.exponent);
        let val = to_smallest_units(value, exponent).ok_or(AmountError::Overflow)?;
        if val != 0 && currency.is_none() {
            return Err(AmountError::MissingCurrency);
        }
        Ok(Self { val, currency })
    }

    /// Value in smallest units.
    #[must_use]
    pub const fn val(&self) -> i64 {
        self.val
    }

    /// The currency record, if any.
    #[must_use]
    pub fn currency(&self) -> Option<&Arc<Currency>> {
        self.currency.as_ref()
    }

    /// The currency code, if any.
    #[must_use]
    pub fn currency_code(&self) -> Option<&str> {
        self.currency.as_deref().map(|c| c.code.as_str())
    }

    /// Fractional digits of the currency, or 2 without currency.
    #[must_use]
    pub fn exponent(&self) -> u32 {
        self.currency.as_ref().map_or(DEFAULT_EXPONENT, |c| c.exponent)
    }

    /// Value in whole units.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.val, self.exponent())
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.val == 0
    }

    /// Returns true if the value is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.val < 0
    }

    /// Returns true if the value is positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.val > 0
    }

    /// Same amount with the opposite sign.
    pub fn checked_neg(&self) -> Result<Self, AmountError> {
        Ok(Self {
            val: self.val.checked_neg().ok_or(AmountError::Overflow)?,
            currency: self.currency.clone(),
        })
    }

    /// Absolute value.
    pub fn checked_abs(&self) -> Result<Self, AmountError> {
        if self.val < 0 {
            self.checked_neg()
        } else {
            Ok(self.clone())
        }
    }

    /// Returns true if `self` and `other` may be added, subtracted or compared.
    ///
    /// A zero or currency-less operand is compatible with anything.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        if self.val == 0 || other.val == 0 {
            return true;
        }
        match (self.currency_code(), other.currency_code()) {
            (Some(left), Some(right)) => left == right,
            _ => true,
        }
    }

    fn check_compatible(&self, other: &Self) -> Result<(), AmountError> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(AmountError::CurrencyMismatch {
                left: self.currency_code().unwrap_or_default().to_string(),
                right: other.currency_code().unwrap_or_default().to_string(),
            })
        }
    }

    /// Currency of a combination: the non-zero side wins, then `self`.
    fn combined_currency(&self, other: &Self) -> Option<Arc<Currency>> {
        if self.val == 0 && other.val != 0 {
            other.currency.clone().or_else(|| self.currency.clone())
        } else {
            self.currency.clone().or_else(|| other.currency.clone())
        }
    }

    /// Adds two compatible amounts.
    pub fn checked_add(&self, other: &Self) -> Result<Self, AmountError> {
        self.check_compatible(other)?;
        Ok(Self {
            val: self.val.checked_add(other.val).ok_or(AmountError::Overflow)?,
            currency: self.combined_currency(other),
        })
    }

    /// Subtracts two compatible amounts.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, AmountError> {
        self.check_compatible(other)?;
        Ok(Self {
            val: self.val.checked_sub(other.val).ok_or(AmountError::Overflow)?,
            currency: self.combined_currency(other),
        })
    }

    /// Multiplies by a scalar, rounding once to the smallest unit.
    pub fn mul_decimal(&self, factor: Decimal) -> Result<Self, AmountError> {
        let scaled = Decimal::from(self.val)
            .checked_mul(factor)
            .ok_or(AmountError::Overflow)?;
        self.with_scaled(scaled)
    }

    /// Divides by a scalar, rounding once to the smallest unit.
    pub fn div_decimal(&self, divisor: Decimal) -> Result<Self, AmountError> {
        if divisor.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        let scaled = Decimal::from(self.val)
            .checked_div(divisor)
            .ok_or(AmountError::Overflow)?;
        self.with_scaled(scaled)
    }

    fn with_scaled(&self, scaled: Decimal) -> Result<Self, AmountError> {
        let val = scaled
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64()
            .ok_or(AmountError::Overflow)?;
        Ok(Self {
            val,
            currency: self.currency.clone(),
        })
    }

    /// Ratio between two amounts of the same currency.
    pub fn ratio(&self, other: &Self) -> Result<Decimal, AmountError> {
        self.check_compatible(other)?;
        if other.val == 0 {
            return Err(AmountError::DivisionByZero);
        }
        Decimal::from(self.val)
            .checked_div(Decimal::from(other.val))
            .ok_or(AmountError::Overflow)
    }

    /// Orders two compatible amounts.
    pub fn checked_cmp(&self, other: &Self) -> Result<Ordering, AmountError> {
        self.check_compatible(other)?;
        Ok(self.val.cmp(&other.val))
    }
}

/// Returns true unless both amounts are non-zero with different currencies.
#[must_use]
pub fn is_same_currency(a: &Amount, b: &Amount) -> bool {
    a.is_compatible(b)
}

/// Returns true if `amount` is zero or carries `code`.
#[must_use]
pub fn is_of_currency(amount: &Amount, code: &str) -> bool {
    amount.is_zero() || amount.currency_code().is_some_and(|c| c.eq_ignore_ascii_case(code))
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        if self.val != other.val {
            return false;
        }
        // Every zero is the same zero
        self.val == 0 || self.currency_code() == other.currency_code()
    }
}

impl Eq for Amount {}

impl Hash for Amount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state);
        if self.val != 0 {
            self.currency_code().hash(state);
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.currency_code() {
            Some(code) => write!(f, "{code} {}", self.to_decimal()),
            None => write!(f, "{}", self.to_decimal()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cur(code: &str, exponent: u32) -> Arc<Currency> {
        Arc::new(Currency::new(code, exponent).unwrap())
    }

    #[test]
    fn test_zero_has_no_currency() {
        let zero = Amount::zero();
        assert!(zero.is_zero());
        assert!(zero.currency().is_none());
        assert_eq!(zero.exponent(), 2);
        assert_eq!(zero, Amount::default());
    }

    #[test]
    fn test_to_decimal_uses_exponent() {
        assert_eq!(Amount::new(3300, cur("USD", 2)).to_decimal(), dec!(33.00));
        assert_eq!(Amount::new(12345, cur("JPY", 3)).to_decimal(), dec!(12.345));
        assert_eq!(Amount::new(7, cur("XOF", 0)).to_decimal(), dec!(7));
    }

    #[test]
    fn test_from_decimal_rounds_bankers() {
        let usd = cur("USD", 2);
        // 1.111 → 1.11
        let a = Amount::from_decimal(dec!(1.111), Some(usd.clone())).unwrap();
        assert_eq!(a.val(), 111);
        // 0.125 → 0.12 (half to even)
        let a = Amount::from_decimal(dec!(0.125), Some(usd.clone())).unwrap();
        assert_eq!(a.val(), 12);
        // 0.135 → 0.14
        let a = Amount::from_decimal(dec!(0.135), Some(usd)).unwrap();
        assert_eq!(a.val(), 14);
    }

    #[test]
    fn test_from_decimal_requires_currency_for_non_zero() {
        assert_eq!(
            Amount::from_decimal(dec!(1), None),
            Err(AmountError::MissingCurrency)
        );
        assert_eq!(Amount::from_decimal(dec!(0), None).unwrap(), Amount::zero());
    }

    #[test]
    fn test_from_decimal_overflow() {
        let usd = cur("USD", 2);
        assert_eq!(
            Amount::from_decimal(dec!(100000000000000000000), Some(usd)),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_add_same_currency() {
        let cad = cur("CAD", 2);
        let sum = Amount::new(100, cad.clone())
            .checked_add(&Amount::new(200, cad.clone()))
            .unwrap();
        assert_eq!(sum, Amount::new(300, cad));
    }

    #[test]
    fn test_add_different_currency_fails() {
        let err = Amount::new(100, cur("CAD", 2))
            .checked_add(&Amount::new(200, cur("USD", 2)))
            .unwrap_err();
        assert!(matches!(err, AmountError::CurrencyMismatch { .. }));
    }

    #[test]
    fn test_add_zero_of_other_currency() {
        let cad = cur("CAD", 2);
        let usd = cur("USD", 2);
        let sum = Amount::new(100, cad.clone())
            .checked_add(&Amount::zero_of(usd.clone()))
            .unwrap();
        assert_eq!(sum.currency_code(), Some("CAD"));
        let sum = Amount::zero_of(usd)
            .checked_add(&Amount::new(200, cad))
            .unwrap();
        assert_eq!(sum.currency_code(), Some("CAD"));
        assert_eq!(sum.val(), 200);
    }

    #[test]
    fn test_sub_from_zero() {
        let cad = cur("CAD", 2);
        let diff = Amount::zero().checked_sub(&Amount::new(22, cad.clone())).unwrap();
        assert_eq!(diff, Amount::new(-22, cad));
    }

    #[test]
    fn test_overflow_detected() {
        let usd = cur("USD", 2);
        let max = Amount::new(i64::MAX, usd.clone());
        assert_eq!(
            max.checked_add(&Amount::new(1, usd.clone())),
            Err(AmountError::Overflow)
        );
        assert_eq!(
            Amount::new(i64::MIN, usd).checked_neg(),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_mul_and_div_scalar() {
        let cad = cur("CAD", 2);
        let a = Amount::new(200, cad.clone());
        assert_eq!(a.mul_decimal(dec!(1.5)).unwrap(), Amount::new(300, cad.clone()));
        assert_eq!(
            Amount::new(300, cad.clone()).div_decimal(dec!(1.5)).unwrap(),
            Amount::new(200, cad.clone())
        );
        assert_eq!(a.div_decimal(Decimal::ZERO), Err(AmountError::DivisionByZero));
        // 1.00 / 3 = 0.333.. → 33
        assert_eq!(
            Amount::new(100, cad.clone()).div_decimal(dec!(3)).unwrap().val(),
            33
        );
    }

    #[test]
    fn test_ratio() {
        let cad = cur("CAD", 2);
        let ratio = Amount::new(100, cad.clone())
            .ratio(&Amount::new(200, cad.clone()))
            .unwrap();
        assert_eq!(ratio, dec!(0.5));
        assert!(Amount::new(100, cad)
            .ratio(&Amount::new(200, cur("USD", 2)))
            .is_err());
    }

    #[test]
    fn test_equality() {
        let cad = cur("CAD", 2);
        let usd = cur("USD", 2);
        assert_eq!(Amount::new(10, cad.clone()), Amount::new(10, cad.clone()));
        assert_ne!(Amount::new(10, cad.clone()), Amount::new(11, cad.clone()));
        assert_ne!(Amount::new(42, cad.clone()), Amount::new(42, usd.clone()));
        // Zero is zero whatever the currency
        assert_eq!(Amount::zero_of(cad), Amount::zero_of(usd));
    }

    #[test]
    fn test_equality_by_code_not_pointer() {
        assert_eq!(Amount::new(5, cur("USD", 2)), Amount::new(5, cur("USD", 2)));
    }

    #[test]
    fn test_checked_cmp() {
        let cad = cur("CAD", 2);
        assert_eq!(
            Amount::new(10, cad.clone())
                .checked_cmp(&Amount::new(9, cad.clone()))
                .unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            Amount::new(10, cad).checked_cmp(&Amount::zero()).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_abs_and_neg() {
        let cad = cur("CAD", 2);
        assert_eq!(
            Amount::new(-42, cad.clone()).checked_abs().unwrap(),
            Amount::new(42, cad.clone())
        );
        assert_eq!(
            Amount::new(42, cad.clone()).checked_neg().unwrap(),
            Amount::new(-42, cad)
        );
    }

    #[test]
    fn test_currency_helpers() {
        let cad = cur("CAD", 2);
        let usd = cur("USD", 2);
        assert!(is_same_currency(&Amount::new(1, cad.clone()), &Amount::zero()));
        assert!(!is_same_currency(
            &Amount::new(1, cad.clone()),
            &Amount::new(1, usd)
        ));
        assert!(is_of_currency(&Amount::new(1, cad.clone()), "cad"));
        assert!(is_of_currency(&Amount::zero(), "USD"));
        assert!(!is_of_currency(&Amount::new(1, cad), "USD"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(3300, cur("USD", 2)).to_string(), "USD 33.00");
        assert_eq!(Amount::zero().to_string(), "0.00");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(Amount::new(1234, cur("USD", 2))).unwrap();
        assert_eq!(json, serde_json::json!({ "val": 1234, "currency": "USD" }));
        let json = serde_json::to_value(Amount::zero()).unwrap();
        assert_eq!(json, serde_json::json!({ "val": 0, "currency": null }));
    }
}
