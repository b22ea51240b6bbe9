//! Property-based tests for amount parsing and formatting.
//!
//! - Property 1: Format/Parse Round-Trip
//! - Property 2: Formatting Idempotence
//! - Property 3: Auto Decimal Placement
//! - Property 4: Grouping Separators Are Inert

use proptest::prelude::*;

use super::{Amount, AmountFormatter, AmountParser, ParseOptions};
use crate::currency::CurrencyRegistry;

/// Strategy to generate smallest-unit values (±10^15).
fn value() -> impl Strategy<Value = i64> {
    -1_000_000_000_000_000i64..1_000_000_000_000_000i64
}

/// Strategy to generate currency exponents (0 to 6).
fn exponent() -> impl Strategy<Value = u32> {
    0u32..=6
}

/// Strategy to generate separator pairs used in the wild.
fn separators() -> impl Strategy<Value = (char, char)> {
    prop_oneof![
        Just(('.', ',')),
        Just((',', '.')),
        Just(('.', ' ')),
        Just((',', ' ')),
        Just(('.', '\'')),
    ]
}

fn registry_with(exponent: u32) -> CurrencyRegistry {
    let registry = CurrencyRegistry::new();
    registry.register_code("XTS", exponent).unwrap();
    registry
}

fn group(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(',');
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Format/Parse Round-Trip
    // =========================================================================

    /// Property 1.1: Parsing a formatted amount gives the amount back.
    ///
    /// *For any* value, exponent and separator pair, parse(format(a)) SHALL
    /// equal `a`.
    #[test]
    fn prop_format_parse_round_trip(
        val in value(),
        exp in exponent(),
        (decimal_sep, grouping_sep) in separators(),
    ) {
        let registry = registry_with(exp);
        let currency = registry.get("XTS").unwrap();
        let amount = Amount::new(val, currency);
        let formatter = AmountFormatter::with_separators(decimal_sep, grouping_sep);

        let text = formatter.format(&amount, true, false);
        let parsed = AmountParser::new(&registry)
            .parse(&text, &ParseOptions::default())
            .unwrap();

        prop_assert_eq!(parsed, amount, "round-trip through {:?}", text);
    }

    // =========================================================================
    // Property 2: Formatting Idempotence
    // =========================================================================

    /// Property 2.1: Formatting is a pure function of amount and configuration.
    #[test]
    fn prop_format_is_idempotent(
        val in value(),
        exp in exponent(),
        (decimal_sep, grouping_sep) in separators(),
        show_currency in any::<bool>(),
        blank_if_zero in any::<bool>(),
    ) {
        let registry = registry_with(exp);
        let amount = Amount::new(val, registry.get("XTS").unwrap());
        let formatter = AmountFormatter::with_separators(decimal_sep, grouping_sep);

        let first = formatter.format(&amount, show_currency, blank_if_zero);
        let second = formatter.format(&amount, show_currency, blank_if_zero);
        prop_assert_eq!(first, second);
    }

    // =========================================================================
    // Property 3: Auto Decimal Placement
    // =========================================================================

    /// Property 3.1: Auto decimal mode reads digits as smallest units.
    ///
    /// *For any* digit string and exponent, the value SHALL be the digit
    /// string read as an integer, i.e. the decimal point sits `exponent`
    /// digits from the right with short inputs zero-padded.
    #[test]
    fn prop_auto_decimal_places_point(
        digits in "[0-9]{1,15}",
        exp in exponent(),
    ) {
        let registry = registry_with(exp);
        let options = ParseOptions {
            auto_decimal_place: true,
            ..ParseOptions::with_default("XTS")
        };
        let parsed = AmountParser::new(&registry).parse(&digits, &options).unwrap();
        let expected: i64 = digits.parse().unwrap();
        prop_assert_eq!(parsed.val(), expected);
    }

    // =========================================================================
    // Property 4: Grouping Separators Are Inert
    // =========================================================================

    /// Property 4.1: Inserting grouping separators never changes the value.
    #[test]
    fn prop_grouping_does_not_change_value(
        integer in 0u64..10_000_000_000u64,
        cents in 0u32..100,
    ) {
        let registry = CurrencyRegistry::new();
        let parser = AmountParser::new(&registry);
        let options = ParseOptions::with_default("USD");
        let digits = integer.to_string();

        let plain = parser.parse(&format!("{digits}.{cents:02}"), &options).unwrap();
        let grouped = parser
            .parse(&format!("{}.{cents:02}", group(&digits)), &options)
            .unwrap();
        let quoted = parser
            .parse(&format!("{}.{cents:02}", group(&digits).replace(',', "'")), &options)
            .unwrap();

        prop_assert_eq!(&plain, &grouped);
        prop_assert_eq!(&plain, &quoted);
    }

    /// Property 4.2: Removing the decimal separator changes the value.
    #[test]
    fn prop_decimal_separator_matters(
        integer in 1u64..1_000_000u64,
        cents in 1u32..100,
    ) {
        let registry = CurrencyRegistry::new();
        let parser = AmountParser::new(&registry);
        let options = ParseOptions::with_default("USD");

        let with_point = parser.parse(&format!("{integer}.{cents:02}"), &options).unwrap();
        let without = parser.parse(&format!("{integer}{cents:02}"), &options).unwrap();

        prop_assert_ne!(with_point, without);
    }
}
