//! Currency records and the registry that owns them.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CurrencyError;

/// Largest number of fractional digits a currency may declare.
pub const MAX_EXPONENT: u32 = 10;

/// Exponent assumed for amounts that carry no currency.
pub const DEFAULT_EXPONENT: u32 = 2;

/// Priority given to currencies registered without an explicit rank.
const DEFAULT_PRIORITY: u32 = 100;

static GLOBAL: Lazy<CurrencyRegistry> = Lazy::new(CurrencyRegistry::new);

/// Metadata for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Uppercase 3-letter code, unique within a registry.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Number of fractional digits stored in the smallest unit.
    pub exponent: u32,
    /// Ordering rank; lower values are listed first.
    pub priority: u32,
    /// Display symbol. Only used for parsing when it is unambiguous.
    pub symbol: Option<String>,
}

impl Currency {
    /// Creates a currency record, validating the code and exponent.
    ///
    /// The code is normalized to uppercase.
    pub fn new(code: &str, exponent: u32) -> Result<Self, CurrencyError> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidCode(code.to_string()));
        }
        let code = code.to_ascii_uppercase();
        if exponent > MAX_EXPONENT {
            return Err(CurrencyError::ExponentTooLarge {
                code,
                exponent,
                max: MAX_EXPONENT,
            });
        }
        Ok(Self {
            name: code.clone(),
            code,
            exponent,
            priority: DEFAULT_PRIORITY,
            symbol: None,
        })
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the ordering rank.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the display symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Table of registered currencies keyed by code.
///
/// Backed by a concurrent map so the process-wide instance can be shared
/// without an external lock. Records are handed out as `Arc` snapshots;
/// re-registering a code replaces the record for future lookups only.
#[derive(Debug)]
pub struct CurrencyRegistry {
    by_code: DashMap<String, Arc<Currency>>,
}

impl CurrencyRegistry {
    /// Creates a registry seeded with the base currencies (USD, EUR, CAD).
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.seed();
        registry
    }

    /// Creates a registry with no currency at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_code: DashMap::new(),
        }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Inserts `currency`, replacing any record with the same code.
    pub fn register(&self, currency: Currency) -> Arc<Currency> {
        debug!(
            code = %currency.code,
            exponent = currency.exponent,
            priority = currency.priority,
            "Registering currency"
        );
        let currency = Arc::new(currency);
        self.by_code
            .insert(currency.code.clone(), Arc::clone(&currency));
        currency
    }

    /// Validates and registers a currency from its code and exponent.
    pub fn register_code(&self, code: &str, exponent: u32) -> Result<Arc<Currency>, CurrencyError> {
        Ok(self.register(Currency::new(code, exponent)?))
    }

    /// Looks up a currency, ignoring ASCII case.
    pub fn get(&self, code: &str) -> Option<Arc<Currency>> {
        if code.len() != 3 {
            return None;
        }
        self.by_code
            .get(&code.to_ascii_uppercase())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns true if `code` is registered.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Resolves a display symbol to its currency.
    ///
    /// Returns `None` when no currency, or more than one, claims the symbol.
    pub fn lookup_symbol(&self, symbol: &str) -> Option<Arc<Currency>> {
        let mut found = None;
        for entry in &self.by_code {
            if entry.value().symbol.as_deref() == Some(symbol) {
                if found.is_some() {
                    return None;
                }
                found = Some(Arc::clone(entry.value()));
            }
        }
        found
    }

    /// Returns every currency ordered by `(priority, code)`.
    pub fn all(&self) -> Vec<Arc<Currency>> {
        let mut currencies: Vec<_> = self
            .by_code
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        currencies.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.code.cmp(&b.code)));
        currencies
    }

    /// Number of registered currencies.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Drops every currency except the base ones, which are restored.
    pub fn reset(&self) {
        self.by_code.clear();
        self.seed();
    }

    fn seed(&self) {
        let base = [
            ("USD", "U.S. dollar", 1, None),
            ("EUR", "European Euro", 2, Some("€")),
            ("CAD", "Canadian dollar", 4, None),
        ];
        for (code, name, priority, symbol) in base {
            let mut currency = Currency {
                code: code.to_string(),
                name: name.to_string(),
                exponent: DEFAULT_EXPONENT,
                priority,
                symbol: None,
            };
            if let Some(symbol) = symbol {
                currency = currency.with_symbol(symbol);
            }
            self.register(currency);
        }
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
