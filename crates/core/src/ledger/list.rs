//! Ordered collection of transactions.

use chrono::NaiveDate;

use super::error::TransactionError;
use super::transaction::Transaction;

/// Owns a set of transactions and keeps their per-date positions coherent.
#[derive(Debug, Clone, Default)]
pub struct TransactionList {
    transactions: Vec<Transaction>,
}

impl TransactionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if there is no transaction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The transactions, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// The transaction at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Adds `transaction` and returns its index.
    ///
    /// Unless `keep_position` is set, the transaction is placed after every
    /// other transaction of the same date.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` when the last position of that date is `i32::MAX`.
    pub fn add(
        &mut self,
        mut transaction: Transaction,
        keep_position: bool,
    ) -> Result<usize, TransactionError> {
        if !keep_position {
            transaction.position = match self.last_position(transaction.date) {
                Some(last) => last.checked_add(1).ok_or(TransactionError::Overflow)?,
                None => 0,
            };
        }
        self.transactions.push(transaction);
        Ok(self.transactions.len() - 1)
    }

    /// Index of the first transaction matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&Transaction) -> bool) -> Option<usize> {
        self.transactions.iter().position(predicate)
    }

    /// Removes and returns the transaction at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Transaction> {
        (index < self.transactions.len()).then(|| self.transactions.remove(index))
    }

    /// Sorts by date, then position.
    pub fn sort(&mut self) {
        self.transactions.sort_by(Transaction::chronological_cmp);
    }

    /// Indexes of the transactions dated `date`.
    #[must_use]
    pub fn at_date(&self, date: NaiveDate) -> Vec<usize> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, t)| t.date == date)
            .map(|(i, _)| i)
            .collect()
    }

    /// Moves transaction `from` just before `to` among transactions of its
    /// date, or last when `to` is `None` or on another date.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` when shifting positions would pass `i32::MAX`; the
    /// list is left unchanged in that case.
    pub fn move_before(&mut self, from: usize, to: Option<usize>) -> Result<(), TransactionError> {
        let Some(date) = self.transactions.get(from).map(|t| t.date) else {
            return Ok(());
        };
        let to = to.filter(|&i| self.transactions.get(i).is_some_and(|t| t.date == date));
        let others: Vec<usize> = self.at_date(date).into_iter().filter(|&i| i != from).collect();
        if others.is_empty() {
            return Ok(());
        }
        let target = match to {
            Some(i) => self.transactions[i].position,
            None => others
                .iter()
                .map(|&i| self.transactions[i].position)
                .max()
                .map_or(Some(0), |p| p.checked_add(1))
                .ok_or(TransactionError::Overflow)?,
        };
        if others.iter().any(|&i| self.transactions[i].position == i32::MAX) {
            return Err(TransactionError::Overflow);
        }
        self.transactions[from].position = target;
        for i in others {
            let txn = &mut self.transactions[i];
            if txn.position >= target {
                txn.position += 1;
            }
        }
        Ok(())
    }

    fn last_position(&self, date: NaiveDate) -> Option<i32> {
        self.transactions
            .iter()
            .filter(|t| t.date == date)
            .map(|t| t.position)
            .max()
    }
}
