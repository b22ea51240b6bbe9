//! Transaction balancing.
//!
//! Currencies are never netted against each other: each currency must sum to
//! zero on its own, and imbalances are absorbed by unassigned splits.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::error::TransactionError;
use super::split::Split;
use super::transaction::Transaction;
use crate::amount::Amount;
use crate::currency::Currency;

/// What a balancing pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Indexes of the splits appended to absorb an imbalance.
    pub added: Vec<usize>,
    /// Indexes of existing splits whose amount was changed.
    pub adjusted: Vec<usize>,
    /// Imbalances left in place because every split of the currency points
    /// the same way; offsetting them would reverse the user's intent.
    pub logical_imbalances: Vec<Amount>,
}

impl BalanceReport {
    /// Returns true if no currency was left imbalanced.
    #[must_use]
    pub fn is_logically_balanced(&self) -> bool {
        self.logical_imbalances.is_empty()
    }

    /// Returns true if the transaction was left untouched.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.adjusted.is_empty()
    }
}

/// Running totals for one currency.
#[derive(Debug)]
struct Bucket {
    currency: Arc<Currency>,
    total: i64,
    has_inflow: bool,
    has_outflow: bool,
}

impl Bucket {
    fn imbalance(&self) -> Amount {
        Amount::new(self.total, Arc::clone(&self.currency))
    }
}

fn buckets(splits: &[Split]) -> Result<Vec<Bucket>, TransactionError> {
    let mut buckets: Vec<Bucket> = Vec::new();
    for split in splits {
        let amount = split.amount();
        let Some(currency) = amount.currency() else {
            continue;
        };
        if amount.is_zero() {
            continue;
        }
        let pos = match buckets.iter().position(|b| b.currency.code == currency.code) {
            Some(pos) => pos,
            None => {
                buckets.push(Bucket {
                    currency: Arc::clone(currency),
                    total: 0,
                    has_inflow: false,
                    has_outflow: false,
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[pos];
        bucket.total = bucket
            .total
            .checked_add(amount.val())
            .ok_or(TransactionError::Overflow)?;
        bucket.has_inflow |= amount.is_positive();
        bucket.has_outflow |= amount.is_negative();
    }
    Ok(buckets)
}

impl Transaction {
    /// Brings every currency of the transaction back to zero.
    ///
    /// Each imbalanced currency gets its own offsetting unassigned split.
    /// In a multi-currency transaction, a currency whose splits all share one
    /// sign is left alone and reported in
    /// [`BalanceReport::logical_imbalances`]. Existing splits, `strong` among
    /// them, are never modified.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for an invalid `strong` index and `Overflow`
    /// if a currency total does not fit in 64 bits.
    pub fn balance_currencies(
        &mut self,
        strong: Option<usize>,
    ) -> Result<BalanceReport, TransactionError> {
        if let Some(strong) = strong {
            self.check_index(strong)?;
        }
        let buckets = buckets(self.splits())?;
        let single_currency = buckets.len() == 1;
        let mut report = BalanceReport::default();

        for bucket in buckets.iter().filter(|b| b.total != 0) {
            let imbalance = bucket.imbalance();
            if !single_currency && !(bucket.has_inflow && bucket.has_outflow) {
                warn!(
                    currency = %bucket.currency.code,
                    imbalance = bucket.total,
                    "Currency left logically imbalanced"
                );
                report.logical_imbalances.push(imbalance);
                continue;
            }
            let offset = imbalance.checked_neg()?;
            debug!(
                currency = %bucket.currency.code,
                offset = offset.val(),
                "Appending balancing split"
            );
            let split = self.push_split(Split::new(None, offset));
            report.added.push(split.index());
        }

        Ok(report)
    }

    /// Interactive balancing after the user edited `strong`.
    ///
    /// With two splits, the weak one follows the strong one: it mirrors it
    /// when `keep_two_splits` is set, otherwise its sign is flipped if both
    /// sit on the same side. Multi-currency transactions are handed to
    /// [`Transaction::balance_currencies`]. Any remaining imbalance goes to
    /// the first unassigned split other than `strong`, or to a new one.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for an invalid `strong` index and an amount
    /// error if split totals overflow.
    pub fn balance(
        &mut self,
        strong: Option<usize>,
        keep_two_splits: bool,
    ) -> Result<BalanceReport, TransactionError> {
        if let Some(strong) = strong {
            self.check_index(strong)?;
        }
        let mut report = BalanceReport::default();

        if let (2, Some(strong)) = (self.split_count(), strong) {
            let weak = 1 - strong;
            let strong_amount = self.splits()[strong].amount().clone();
            let weak_amount = self.splits()[weak].amount().clone();
            let same_side = weak_amount.is_positive() == strong_amount.is_positive()
                && !weak_amount.is_zero()
                && !strong_amount.is_zero();
            let target = if keep_two_splits {
                Some(strong_amount.checked_neg()?)
            } else if same_side {
                Some(weak_amount.checked_neg()?)
            } else {
                None
            };
            if let Some(target) = target {
                if target != weak_amount || target.currency_code() != weak_amount.currency_code() {
                    if let Some(split) = self.split_mut(weak) {
                        split.set_amount(target);
                    }
                    report.adjusted.push(weak);
                }
            }
        }

        if self.currencies_with_amount() > 1 {
            let currencies = self.balance_currencies(strong)?;
            report.added = currencies.added;
            report.logical_imbalances = currencies.logical_imbalances;
            return Ok(report);
        }

        let mut imbalance = Amount::zero();
        for split in self.splits() {
            imbalance = imbalance.checked_add(split.amount())?;
        }
        if imbalance.is_zero() {
            return Ok(report);
        }

        let target = self
            .splits()
            .iter()
            .position(|s| s.is_unassigned() && Some(s.index()) != strong);
        match target {
            Some(index) => {
                let adjusted = self.splits()[index].amount().checked_sub(&imbalance)?;
                debug!(index, value = adjusted.val(), "Absorbing imbalance in unassigned split");
                if let Some(split) = self.split_mut(index) {
                    split.set_amount(adjusted);
                }
                if !report.adjusted.contains(&index) {
                    report.adjusted.push(index);
                }
            }
            None => {
                let offset = imbalance.checked_neg()?;
                debug!(value = offset.val(), "Appending balancing split");
                let split = self.push_split(Split::new(None, offset));
                report.added.push(split.index());
            }
        }
        Ok(report)
    }

    fn currencies_with_amount(&self) -> usize {
        let mut codes: Vec<&str> = Vec::new();
        for split in self.splits() {
            let amount = split.amount();
            if amount.is_zero() {
                continue;
            }
            if let Some(code) = amount.currency_code() {
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
        }
        codes.len()
    }
}
