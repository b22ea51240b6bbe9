//! Transaction aggregate.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::TransactionError;
use super::split::Split;
use crate::amount::Amount;

/// Kind of transaction. Only scheduling logic cares; balancing ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Regular transaction.
    #[default]
    Normal,
    /// Spawn of a recurring schedule.
    Recurrence,
    /// Spawn of a budget.
    Budget,
}

/// A dated set of splits.
///
/// The split list is exactly sized: every element is a live split and each
/// split's `index` equals its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Transaction kind.
    pub txn_type: TransactionType,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Payee.
    pub payee: String,
    /// Check number.
    pub checkno: String,
    /// Notes.
    pub notes: String,
    /// Ordering among transactions of the same date.
    pub position: i32,
    /// Last modification time.
    pub mtime: Option<DateTime<Utc>>,
    splits: Vec<Split>,
}

impl Transaction {
    /// Creates an empty transaction.
    #[must_use]
    pub fn new(txn_type: TransactionType, date: NaiveDate) -> Self {
        Self {
            txn_type,
            date,
            description: String::new(),
            payee: String::new(),
            checkno: String::new(),
            notes: String::new(),
            position: 0,
            mtime: None,
            splits: Vec::new(),
        }
    }

    /// Replaces every field of `self`, splits included, with a copy of `src`.
    pub fn copy_from(&mut self, src: &Self) {
        self.clone_from(src);
    }

    /// The splits, in order.
    #[must_use]
    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// The split at `index`.
    #[must_use]
    pub fn split(&self, index: usize) -> Option<&Split> {
        self.splits.get(index)
    }

    /// Mutable access to the split at `index`.
    pub fn split_mut(&mut self, index: usize) -> Option<&mut Split> {
        self.splits.get_mut(index)
    }

    /// Number of splits.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.splits.len()
    }

    /// Appends an empty split and returns it for the caller to fill in.
    pub fn add_split(&mut self) -> &mut Split {
        self.push_split(Split::default())
    }

    /// Appends `split`.
    pub fn push_split(&mut self, mut split: Split) -> &mut Split {
        let index = self.splits.len();
        split.index = index;
        self.splits.push(split);
        &mut self.splits[index]
    }

    /// Moves the split at `from` to position `to`, keeping the others in order.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index does not exist.
    pub fn move_split(&mut self, from: usize, to: usize) -> Result<(), TransactionError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let split = self.splits.remove(from);
        self.splits.insert(to, split);
        self.reindex();
        Ok(())
    }

    /// Removes and returns the split at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if the split does not exist.
    pub fn remove_split(&mut self, index: usize) -> Result<Split, TransactionError> {
        self.check_index(index)?;
        let split = self.splits.remove(index);
        self.reindex();
        Ok(split)
    }

    /// Grows or shrinks the split list to `count`; new splits are empty.
    pub fn resize_splits(&mut self, count: usize) {
        self.splits.resize_with(count, Split::default);
        self.reindex();
    }

    /// Orders by date, then position.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.position.cmp(&other.position))
    }

    /// Records a modification now.
    pub fn touch(&mut self) {
        self.mtime = Some(Utc::now());
    }

    /// Distinct currency codes of the splits, in order of appearance.
    #[must_use]
    pub fn currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for split in &self.splits {
            if let Some(code) = split.amount().currency_code() {
                if !codes.iter().any(|c| c == code) {
                    codes.push(code.to_string());
                }
            }
        }
        codes
    }

    /// Returns true if every split amount is zero.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.splits.iter().all(|s| s.amount().is_zero())
    }

    /// Returns true if each currency sums to zero.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.currencies().iter().all(|code| {
            self.splits
                .iter()
                .filter(|s| s.amount().currency_code() == Some(code.as_str()))
                .try_fold(0i64, |acc, s| acc.checked_add(s.amount().val()))
                == Some(0)
        })
    }

    /// Total of the positive splits, which is what the transaction "moves".
    ///
    /// # Errors
    ///
    /// Fails if the positive splits mix currencies or overflow.
    pub fn amount(&self) -> Result<Amount, TransactionError> {
        let mut total = Amount::zero();
        for split in self.splits.iter().filter(|s| s.amount().is_positive()) {
            total = total.checked_add(split.amount())?;
        }
        Ok(total)
    }

    /// Splits separated into "froms" (negative) and "tos" (positive).
    ///
    /// Null splits go to the froms, except that one is sent to the tos when
    /// there would be none otherwise.
    #[must_use]
    pub fn splitted(&self) -> (Vec<&Split>, Vec<&Split>) {
        let mut nulls: Vec<&Split> = self.splits.iter().filter(|s| s.amount().is_zero()).collect();
        let mut froms: Vec<&Split> = self.splits.iter().filter(|s| s.amount().is_negative()).collect();
        let mut tos: Vec<&Split> = self.splits.iter().filter(|s| s.amount().is_positive()).collect();
        if tos.is_empty() {
            if let Some(null) = nulls.pop() {
                tos.push(null);
            }
        }
        froms.extend(nulls);
        (froms, tos)
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), TransactionError> {
        if index < self.splits.len() {
            Ok(())
        } else {
            Err(TransactionError::IndexOutOfRange {
                index,
                len: self.splits.len(),
            })
        }
    }

    fn reindex(&mut self) {
        for (index, split) in self.splits.iter_mut().enumerate() {
            split.index = index;
        }
        trace!(count = self.splits.len(), "Reindexed splits");
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
