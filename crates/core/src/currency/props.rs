//! Property-based tests for the currency registry.
//!
//! - Property 5: Registration Is Observable
//! - Property 6: Listing Order

use proptest::prelude::*;

use super::registry::{Currency, CurrencyRegistry, MAX_EXPONENT};

/// Strategy to generate 3-letter codes in mixed case.
fn currency_code() -> impl Strategy<Value = String> {
    "[a-zA-Z]{3}"
}

/// Strategy to generate valid exponents.
fn exponent() -> impl Strategy<Value = u32> {
    0u32..=MAX_EXPONENT
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 5: Registration Is Observable
    // =========================================================================

    /// Property 5.1: A registered code is found whatever its case.
    #[test]
    fn prop_registered_code_found_in_any_case(
        code in currency_code(),
        exp in exponent(),
    ) {
        let registry = CurrencyRegistry::empty();
        registry.register_code(&code, exp).unwrap();

        for variant in [code.to_lowercase(), code.to_uppercase(), code.clone()] {
            let found = registry.get(&variant).unwrap();
            prop_assert_eq!(&found.code, &code.to_uppercase());
            prop_assert_eq!(found.exponent, exp);
        }
    }

    /// Property 5.2: Re-registering overwrites and keeps a single entry.
    #[test]
    fn prop_register_overwrites(
        code in currency_code(),
        first in exponent(),
        second in exponent(),
    ) {
        let registry = CurrencyRegistry::empty();
        registry.register_code(&code, first).unwrap();
        registry.register_code(&code, second).unwrap();

        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(registry.get(&code).unwrap().exponent, second);
    }

    /// Property 5.3: Exponents above the maximum are refused.
    #[test]
    fn prop_large_exponent_rejected(
        code in currency_code(),
        exp in (MAX_EXPONENT + 1)..100u32,
    ) {
        let registry = CurrencyRegistry::empty();
        prop_assert!(registry.register_code(&code, exp).is_err());
        prop_assert!(registry.is_empty());
    }

    // =========================================================================
    // Property 6: Listing Order
    // =========================================================================

    /// Property 6.1: `all()` is sorted by priority, then code.
    #[test]
    fn prop_all_sorted(
        entries in prop::collection::vec((currency_code(), 0u32..10), 1..20),
    ) {
        let registry = CurrencyRegistry::new();
        for (code, priority) in &entries {
            registry.register(Currency::new(code, 2).unwrap().with_priority(*priority));
        }

        let all = registry.all();
        prop_assert_eq!(all.len(), registry.len());
        for pair in all.windows(2) {
            let key = |c: &Currency| (c.priority, c.code.clone());
            prop_assert!(key(&pair[0]) <= key(&pair[1]));
        }
    }
}
