//! Property-based tests for transaction balancing.
//!
//! - Property 7: Single-Currency Balancing
//! - Property 8: Multi-Currency Balancing

use std::sync::Arc;

use chrono::NaiveDate;
use centime_shared::AccountId;
use proptest::prelude::*;

use super::{Split, Transaction, TransactionType};
use crate::amount::Amount;
use crate::currency::Currency;

/// Strategy to generate non-zero split values.
fn non_zero_value() -> impl Strategy<Value = i64> {
    prop_oneof![-1_000_000_000i64..0, 1i64..1_000_000_000]
}

/// Strategy to generate a currency code from a small pool.
fn currency_code() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("USD"), Just("EUR"), Just("CAD")]
}

fn transaction(values: &[(i64, &str)]) -> Transaction {
    let mut txn = Transaction::new(
        TransactionType::Normal,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    );
    for &(val, code) in values {
        let currency = Arc::new(Currency::new(code, 2).unwrap());
        txn.push_split(Split::new(Some(AccountId::new()), Amount::new(val, currency)));
    }
    txn
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 7: Single-Currency Balancing
    // =========================================================================

    /// Property 7.1: An unbalanced two-split transaction gains exactly one
    /// offsetting split and keeps the existing amounts.
    #[test]
    fn prop_two_split_balancing_appends_one(
        a in non_zero_value(),
        b in non_zero_value(),
        strong in prop::option::of(0usize..2),
    ) {
        prop_assume!(a + b != 0);
        let mut txn = transaction(&[(a, "CAD"), (b, "CAD")]);

        let report = txn.balance_currencies(strong).unwrap();

        prop_assert_eq!(report.added, vec![2]);
        prop_assert_eq!(txn.split_count(), 3);
        prop_assert_eq!(txn.splits()[0].amount().val(), a);
        prop_assert_eq!(txn.splits()[1].amount().val(), b);
        prop_assert_eq!(txn.splits()[2].amount().val(), -(a + b));
        prop_assert!(txn.splits()[2].is_unassigned());
        prop_assert!(txn.is_balanced());
    }

    /// Property 7.2: Interactive balancing always ends balanced.
    #[test]
    fn prop_balance_restores_zero_sum(
        values in prop::collection::vec(non_zero_value(), 1..6),
        keep_two_splits in any::<bool>(),
    ) {
        let pairs: Vec<(i64, &str)> = values.iter().map(|&v| (v, "USD")).collect();
        let mut txn = transaction(&pairs);
        let strong = Some(0);

        txn.balance(strong, keep_two_splits).unwrap();

        prop_assert!(txn.is_balanced());
        prop_assert_eq!(txn.splits()[0].amount().val(), values[0]);
    }

    // =========================================================================
    // Property 8: Multi-Currency Balancing
    // =========================================================================

    /// Property 8.1: Currencies that each sum to zero are left untouched.
    #[test]
    fn prop_balanced_currencies_noop(
        x in non_zero_value(),
        y in non_zero_value(),
    ) {
        let mut txn = transaction(&[(x, "USD"), (-x, "USD"), (y, "EUR"), (-y, "EUR")]);
        let before = txn.clone();

        let report = txn.balance_currencies(None).unwrap();

        prop_assert!(report.is_noop());
        prop_assert!(report.is_logically_balanced());
        prop_assert_eq!(txn, before);
    }

    /// Property 8.2: Currencies are balanced independently, never netted.
    #[test]
    fn prop_currencies_not_netted(
        splits in prop::collection::vec((non_zero_value(), currency_code()), 2..8),
    ) {
        let mut txn = transaction(&splits);
        let original = txn.split_count();

        let report = txn.balance_currencies(None).unwrap();

        for (i, &(val, _)) in splits.iter().enumerate() {
            prop_assert_eq!(txn.splits()[i].amount().val(), val);
        }
        prop_assert_eq!(txn.split_count(), original + report.added.len());
        for code in txn.currencies() {
            let total: i64 = txn
                .splits()
                .iter()
                .filter(|s| s.amount().currency_code() == Some(code.as_str()))
                .map(|s| s.amount().val())
                .sum();
            let left = report
                .logical_imbalances
                .iter()
                .find(|a| a.currency_code() == Some(code.as_str()))
                .map_or(0, Amount::val);
            prop_assert_eq!(total, left);
        }
    }
}
